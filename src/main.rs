use clap::Parser;
use contactbook::cli::{
    run_add, run_check, run_delete, run_export, run_import, run_list, run_search, run_show,
    run_template, run_update, Cli, Commands,
};
use contactbook::config::DEFAULT_LOG_FILTER;
use contactbook::{Config, Database};
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    // Logs go to stderr so command output on stdout stays clean
    let filter = EnvFilter::try_new(&config.log_filter)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    debug!(path = %config.db_path.display(), "using contact database");
    let db = Database::open_at(&config.db_path)?;

    match cli.command {
        None => {
            run_list(&db, 1, config.page_size, None, "asc", false)?;
        }
        Some(Commands::List(args)) => {
            let limit = args.limit.unwrap_or(config.page_size);
            run_list(&db, args.page, limit, args.sort, &args.order, args.all)?;
        }
        Some(Commands::Search(args)) => {
            run_search(&db, &args.query)?;
        }
        Some(Commands::Show(args)) => {
            run_show(&db, args.id, args.json)?;
        }
        Some(Commands::Add(args)) => {
            run_add(&db, args.fields)?;
        }
        Some(Commands::Update(args)) => {
            run_update(&db, args.id, args.fields)?;
        }
        Some(Commands::Delete(args)) => {
            run_delete(&db, args.id, args.force)?;
        }
        Some(Commands::Export(args)) => {
            run_export(&db, &args.path, args.search.as_deref())?;
        }
        Some(Commands::Import(args)) => {
            run_import(&db, &args.path, args.report_duplicates)?;
        }
        Some(Commands::Check(args)) => {
            run_check(&args.path)?;
        }
        Some(Commands::Template(args)) => {
            run_template(&args.path)?;
        }
    }

    Ok(())
}
