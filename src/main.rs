fn main() {
    use godepgraph::cli::parse;
    let cli = parse();
    let code = godepgraph::app::run_cli(cli);
    if code != 0 {
        std::process::exit(code);
    }
}
