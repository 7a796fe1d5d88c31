use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use utils::mk_bitflag;

use crate::environement::{
    Environement, EnvironementBuilder, EnvironementBuilderError, Flags, DEFAULT_MAX_DEPTH,
    DEFAULT_MAX_SIZE, DEFAULT_SKOLEM_PREFIX,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// json input, read from stdin when absent
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// what to do with the input
    ///
    /// `cnf` expects a sentence, `unify` a pair of literals
    #[arg(short, long, value_enum, default_value_t = Command::Cnf)]
    pub command: Command,

    #[arg(short, long, value_enum, default_value_t = Output::Stdout)]
    pub output_format: Output,

    /// maximal depth of the input sentence
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: u32,

    /// maximal number of nodes of the input sentence and of the
    /// intermediate steps of the distribution
    #[arg(long, default_value_t = DEFAULT_MAX_SIZE)]
    pub max_size: usize,

    /// prefix of the skolem symbols
    #[arg(long, default_value = DEFAULT_SKOLEM_PREFIX)]
    pub skolem_prefix: String,

    /// rename quantified variables instead of failing when skolemisation
    /// would capture them
    #[arg(long)]
    pub rename_binders: bool,

    /// ignore `max_depth` and `max_size`
    #[arg(long)]
    pub no_limits: bool,

    /// check the output of every stage
    #[arg(long)]
    pub verify: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Command {
    #[default]
    Cnf,
    Unify,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Output {
    /// no output
    Quiet,
    /// human readable
    #[default]
    Stdout,
    Json,
    PrettyJson,
}

impl TryFrom<&Args> for Environement {
    type Error = EnvironementBuilderError;

    fn try_from(args: &Args) -> Result<Self, Self::Error> {
        let Args {
            max_depth,
            max_size,
            skolem_prefix,
            rename_binders,
            no_limits,
            verify,
            ..
        } = args;

        let flags: Flags = mk_bitflag!(
            !*no_limits => Flags::CHECK_LIMITS,
            *rename_binders => Flags::RENAME_BINDERS,
            *verify => Flags::VERIFY,
        );

        EnvironementBuilder::default()
            .max_depth(*max_depth)
            .max_size(*max_size)
            .skolem_prefix(skolem_prefix.as_str())
            .flags(flags)
            .build()
    }
}
