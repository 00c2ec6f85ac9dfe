use overlap2plot::io_utils;
use overlap2plot::plot_overlap::{run, Cli, FIGURE_SIZE};

use log::{debug, info, LevelFilter};
use plotters::prelude::BitMapBackend;
use simple_logger::SimpleLogger;
use structopt::StructOpt;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    //Set up logger.
    SimpleLogger::new().with_level(LevelFilter::Info).init()?;

    let args = Cli::from_args();
    debug!("Arguments received: {:#?}", args);

    // Checked before the backend exists so nothing is written on failure
    let out_path = io_utils::get_output_path(&args.outdir)?;
    info!("Plotting read overlap to {:?}", out_path);

    run(&args.stats, BitMapBackend::new(&out_path, FIGURE_SIZE))?;
    println!("\n  Saved: {}", out_path.display());

    Ok(())
}
