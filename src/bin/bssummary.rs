//!
//! # bssummary
//!
//! BookShelf Benchmark Summary CLI
//!

use clap::Parser;
use std::error::Error;

use bookshelf21::BsDesign;

// => The doc-comment on `ProgramOptions` here is displayed by the `clap`-generated help docs =>

/// BookShelf Placement-Benchmark Summary Generator
#[derive(Parser)]
pub struct ProgramOptions {
    /// Benchmark Directory
    #[clap(short = 'd', long, default_value = ".")]
    dir: String,
    /// Design Basename, e.g. `adaptec1`
    #[clap(short = 'b', long)]
    basename: String,
    /// Report Output File. Writes the report to stdout when empty.
    #[clap(short = 'o', long, default_value = "")]
    out: String,
    /// Parsed-Design Dump File
    #[clap(long, default_value = "")]
    dump: String,
    /// Dump Format. One of ("json", "yaml")
    #[clap(short = 'f', long, default_value = "yaml")]
    fmt: String,
    /// Verbose Output Mode
    #[clap(short, long)]
    verbose: bool,
}

/// The main entry point.
/// All logic is offloaded to `_main` for sake of testing.
fn main() -> Result<(), Box<dyn Error>> {
    let options = ProgramOptions::parse();
    _main(&options)
}

/// All the real logic, with `ProgramOptions` argument for sake of testing
fn _main(options: &ProgramOptions) -> Result<(), Box<dyn Error>> {
    // Parse the five benchmark files to a [BsDesign]
    let design = BsDesign::open(&options.dir, &options.basename)?;

    if options.verbose {
        let stats = design.stats();
        println!("{:?}", stats);
    }

    // Render the summary report
    if options.out.is_empty() {
        print!("{}", design.report()?);
    } else {
        design.save_report(&options.out)?;
        if options.verbose {
            println!("wrote {:?}", &options.out);
        }
    }

    // And optionally dump the parsed design in a markup format
    if !options.dump.is_empty() {
        let file = std::fs::File::create(&options.dump)?;
        match options.fmt.as_str() {
            "json" => serde_json::to_writer_pretty(file, &design)?,
            "yaml" => serde_yaml::to_writer(file, &design)?,
            fmt => {
                return Err(format!("Invalid format: {}. Must be one of (json, yaml).", fmt).into())
            }
        };
        if options.verbose {
            println!("wrote {:?}", &options.dump);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper function: Grab the full path of resource-file `fname`
    fn resource(rname: &str) -> String {
        format!("{}/resources/{}", env!("CARGO_MANIFEST_DIR"), rname)
    }

    #[test]
    fn run_summary_to_file() -> Result<(), Box<dyn Error>> {
        let out_path = resource("ibex.summary.txt");
        let options = ProgramOptions {
            dir: resource(""),
            basename: "ibex".to_string(),
            out: out_path.clone(),
            dump: resource("ibex.design.yaml"),
            fmt: "yaml".to_string(),
            verbose: true,
        };
        _main(&options)?;

        // Read back what it wrote to disk
        let report = std::fs::read_to_string(&out_path)?;
        assert!(report.starts_with("Use BOOKSHELF placement format"));
        assert!(report.ends_with("Pin #: 7\n"));
        let readback: BsDesign = serde_yaml::from_reader(std::fs::File::open(resource(
            "ibex.design.yaml",
        ))?)?;
        assert_eq!(readback.nodes.len(), 6);
        Ok(())
    }
}
