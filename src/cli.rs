/// terminal front end: numbered menu over the calculator tasks and reference tables
pub mod cli_main;
