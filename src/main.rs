use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    spur_chat::cli::main()
}
