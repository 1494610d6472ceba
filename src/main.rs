fn main() {
    if let Err(error) = server_inputs::run() {
        tracing::error!("{}", error);
        eprintln!("error: {}", error);
        std::process::exit(1);
    }
}
