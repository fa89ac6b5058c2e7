fn main() {
    if let Err(e) = mapscope_cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
