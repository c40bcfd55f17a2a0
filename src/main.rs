pub mod aggregate;
pub mod catalog;
pub mod cli;
pub mod codegen;
pub mod error;
pub mod extract;
pub mod html;
pub mod path_de;
pub mod phrase;
pub mod schema;
pub mod ty;

use colored::Colorize;

fn main() {
    let command_line_interface = cli::CommandLineInterface::load();
    if let Err(error) = command_line_interface.run() {
        eprintln!("{} {error:#}", "error:".red().bold());
        std::process::exit(1);
    }
}
