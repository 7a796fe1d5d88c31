use std::{
    fs::read_to_string,
    io::{self, Read},
    process::ExitCode,
};

use clap::Parser;
use fol_cnf::{
    cli::{Args, Output},
    init_logger, run_from_json, Result,
};

use log::trace;
use utils::traits::MyWriteTo;

fn main() -> ExitCode {
    let args = Args::parse();
    let output_format = args.output_format;

    init_logger();

    trace!("start");
    trace!("read input...");
    let res = read_input(&args).and_then(|str| {
        trace!("input read");
        run_from_json(&args, &str)
    });
    let code = if res.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    };

    match output_format {
        Output::Quiet => (),
        Output::Stdout => match res {
            Ok(res) => {
                if let Err(e) = res.writeln_to_io(&mut io::stdout().lock()) {
                    eprintln!("unable to write to stdout: {e}")
                }
            }
            Err(e) => eprintln!("{e}"),
        },
        Output::Json => {
            let res = res.map_err(|e| format!("{e:}"));
            match serde_json::to_string(&res) {
                Ok(json) => println!("{json}"),
                Err(e) => eprintln!("{e}"),
            }
        }
        Output::PrettyJson => {
            let res = res.map_err(|e| format!("{e:}"));
            match serde_json::to_string_pretty(&res) {
                Ok(json) => println!("{json}"),
                Err(e) => eprintln!("{e}"),
            }
        }
    }

    trace!("done");
    code
}

/// Reads the whole of `args.file`, or stdin when no file is given
fn read_input(args: &Args) -> Result<String> {
    match &args.file {
        Some(file) => Ok(read_to_string(file)?),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}
