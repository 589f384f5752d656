//! # Etiqueta CLI
//!
//! Command-line interface for price tag generation.
//!
//! ## Usage
//!
//! ```bash
//! # Generate a PDF from a CSV file
//! etiqueta generate products.csv -o tags.pdf
//!
//! # Use custom cell geometry (centimeters)
//! etiqueta generate products.csv --cell-width 20 --cell-height 3.5
//!
//! # Run the upload server
//! etiqueta serve --listen 0.0.0.0:8080 --assets ./assets
//! ```

use chrono::Local;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use etiqueta::{
    EtiquetaError, LayoutParams, RenderingContext, generate_tags,
    server::{ServerConfig, serve},
};

/// Etiqueta - price tag sheet generator
#[derive(Parser, Debug)]
#[command(name = "etiqueta")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Sheet and cell geometry flags, all in centimeters.
#[derive(Args, Debug)]
struct LayoutArgs {
    /// Cell width in cm
    #[arg(long, default_value = "23.9")]
    cell_width: f64,

    /// Cell height in cm
    #[arg(long, default_value = "3.4")]
    cell_height: f64,

    /// Sheet margin in cm
    #[arg(long, default_value = "1.0")]
    margin: f64,

    /// Vertical gap between rows in cm
    #[arg(long, default_value = "1.0")]
    row_gap: f64,
}

impl LayoutArgs {
    fn to_params(&self) -> LayoutParams {
        LayoutParams::from_cm(self.cell_width, self.cell_height, self.margin, self.row_gap)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a PDF of price tags from a CSV file
    Generate {
        /// Input CSV file
        input: PathBuf,

        /// Output PDF file (defaults to price-tags-{date}.pdf)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Directory holding fonts/ and logos/ resources
        #[arg(long, default_value = "./assets")]
        assets: PathBuf,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Run the HTTP upload server
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "0.0.0.0:8080")]
        listen: String,

        /// Directory holding fonts/ and logos/ resources
        #[arg(long, default_value = "./assets")]
        assets: PathBuf,

        #[command(flatten)]
        layout: LayoutArgs,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), EtiquetaError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            input,
            output,
            assets,
            layout,
        } => {
            let output = output.unwrap_or_else(|| {
                PathBuf::from(format!("price-tags-{}.pdf", Local::now().format("%Y-%m-%d")))
            });

            let csv_text = std::fs::read_to_string(&input)?;
            let ctx = RenderingContext::load(&assets);
            let pdf = generate_tags(&csv_text, &layout.to_params(), &ctx)?;
            std::fs::write(&output, &pdf)?;

            println!("Generated: {}", output.display());
            Ok(())
        }

        Commands::Serve {
            listen,
            assets,
            layout,
        } => {
            let config = ServerConfig {
                listen_addr: listen,
                assets_dir: assets,
                layout: layout.to_params(),
            };
            tokio::runtime::Runtime::new()?.block_on(serve(config))
        }
    }
}
