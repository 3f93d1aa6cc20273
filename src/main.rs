use std::path::PathBuf;
use std::process::ExitCode;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use log::error;
use crate::config::Credentials;
use crate::error::Error;
use crate::session::{SaleItem, Session};
use crate::store::SalesStore;

mod catalog;
mod config;
mod csv_handler;
mod error;
mod ledger;
mod session;
mod store;
mod totals;

/// Records sales, keeps the product catalog and reports the running total.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory holding ventas.csv, productos.json and totales.csv.
    #[arg(long, env = "SALES_DATA_DIR", default_value = ".")]
    data_dir: PathBuf,

    #[arg(long, short)]
    user: String,

    #[arg(long, short)]
    password: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the sales history with each row's index and the refreshed total.
    Sales,
    /// Show the product catalog.
    Products,
    /// Recompute, save and show the total of all sales.
    Total {
        /// Show the last saved total instead of recomputing it.
        #[arg(long)]
        saved: bool,
    },
    /// Show the catalog price of a product.
    Price { name: String },
    /// Record a sale. Without --price the product must be in the catalog.
    Add {
        product: String,
        /// Price of a new product, which is added to the catalog.
        #[arg(long)]
        price: Option<f64>,
        /// Date of the sale (YYYY-MM-DD), today if omitted.
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Delete the sale at INDEX. Later sales move down one index.
    Delete { index: usize },
    /// Remove a product from the catalog.
    DeleteProduct { name: String },
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let credentials = match Credentials::from_env() {
        Ok(credentials) => credentials,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    if !session::login(&credentials, &args.user, &args.password) {
        eprintln!("{}", Error::InvalidCredentials);
        return ExitCode::FAILURE;
    }

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_recoverable() => {
            eprintln!("warning: {}", e);
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Error> {
    let today = Local::now().date_naive();
    let mut session = Session::open(SalesStore::new(&args.data_dir), today)?;
    let mut stdout = std::io::stdout();

    match args.command {
        Command::Sales => print_refreshed(&mut stdout, &session)?,
        Command::Products => csv_handler::print_catalog(&mut stdout, session.catalog()).map_err(stdout_error)?,
        Command::Total { saved: true } => match session.latest_totals()? {
            Some(snapshot) => csv_handler::print_totals(&mut stdout, &snapshot).map_err(stdout_error)?,
            None => println!("No totals have been computed yet"),
        },
        Command::Total { saved: false } => {
            let snapshot = session.refresh_totals()?;
            csv_handler::print_totals(&mut stdout, &snapshot).map_err(stdout_error)?;
        }
        Command::Price { name } => {
            let price = session.price_of(&name)?;
            println!("Price for {}: ${:.2}", name, price);
        }
        Command::Add { product, price, date } => {
            let item = match price {
                Some(price) => SaleItem::NewProduct { name: product, price },
                None => SaleItem::FromCatalog(product),
            };
            println!("{}", session.register_sale(date.unwrap_or(today), item)?);
            print_refreshed(&mut stdout, &session)?;
        }
        Command::Delete { index } => {
            println!("{}", session.delete_sale(index)?);
            print_refreshed(&mut stdout, &session)?;
        }
        Command::DeleteProduct { name } => {
            println!("{}", session.delete_product(&name)?);
            if session.catalog().is_empty() {
                println!("The catalog is now empty");
            }
        }
    }
    Ok(())
}

/// Shows the history together with the total, recomputed and saved.
fn print_refreshed(mut out: impl std::io::Write, session: &Session) -> Result<(), Error> {
    let snapshot = session.refresh_totals()?;
    csv_handler::print_sales(&mut out, session.ledger()).map_err(stdout_error)?;
    csv_handler::print_totals(&mut out, &snapshot).map_err(stdout_error)
}

fn stdout_error(e: std::io::Error) -> Error {
    Error::io("<stdout>", e)
}
