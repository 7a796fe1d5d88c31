pub mod cnf;
pub mod manipulation;
pub mod sentence;
pub mod symbol;
pub mod term;
pub mod variable;
