pub mod environement;
pub mod error;
pub mod formula;

#[cfg(test)]
mod tests;

use std::io::Write;

use log::trace;

use crate::{
    cli::{Args, Command},
    environement::Environement,
    formula::{cnf::clauses, sentence::Sentence},
};

pub use error::{BaseError, Error, Result};

pub mod cli;

pub use return_value::Return;
mod return_value;

/// Runs `args.command` on the json encoded `str`
pub fn run_from_json(args: &Args, str: &str) -> Result<Return> {
    let env = Environement::try_from(args)?;
    match args.command {
        Command::Cnf => {
            trace!("running cnf");
            let sentence: Sentence = serde_json::from_str(str)?;
            let cnf = sentence.cnf_with(&env)?;
            let clauses = clauses(&cnf)?;
            Ok(Return::Cnf { cnf, clauses })
        }
        Command::Unify => {
            trace!("running unify");
            let (left, right): (Sentence, Sentence) = serde_json::from_str(str)?;
            Ok(Return::Unifier(left.unify(&right)?))
        }
    }
}

pub fn init_logger() {
    env_logger::Builder::new()
        .format(|buf, record| {
            let str = record.args().to_string().replace("\n", "\n\t");
            writeln!(
                buf,
                "[{}] in {}:{}\n\t{}",
                record.level(),
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                str
            )
        })
        .parse_default_env()
        .init();
}
