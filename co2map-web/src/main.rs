use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use structopt::StructOpt;
use tracing::info;

use co2map_core::loader;
use co2map_web::{init_logging, make_app};

#[derive(StructOpt)]
struct CliArgs {
    #[structopt(long = "log-level", case_insensitive = true, default_value = "INFO")]
    log_level: tracing::Level,
    /// City dataset to serve.
    #[structopt(long = "csv-path", default_value = "data.csv")]
    csv_path: PathBuf,
    #[structopt(long = "port", env = "PORT", default_value = "5000")]
    port: u16,
}

#[tokio::main]
async fn main() {
    let args = CliArgs::from_args();
    init_logging(args.log_level);

    // A missing or malformed dataset is fatal: the service never starts
    // with a partial collection.
    let db = loader::load_from_csv(&args.csv_path).expect("cannot load city dataset");

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    info!("serving {} cities on {addr}", db.len());
    axum::Server::bind(&addr)
        .serve(make_app(Arc::new(db)).into_make_service())
        .await
        .expect("server error");
}
