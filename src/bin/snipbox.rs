fn main() {
    std::process::exit(snipbox::cli::run())
}
