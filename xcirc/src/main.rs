use clap::Parser;
use log::{error, info};
use simple_logger::init_with_level;
use xcirc::{Args, xcirc};

fn main() {
    let args = Args::parse();

    init_with_level(args.level).unwrap_or_else(|e| panic!("{}", e));
    info!("Starting xcirc with args: {}", args);

    xcirc(args).unwrap_or_else(|e| {
        error!("{}", e);
        std::process::exit(1);
    });
}
