fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = match flow_zoxide::runtime::parse_cli_args(&args) {
        Ok(options) => options,
        Err(error) => {
            if !error.use_stderr() {
                let _ = error.print();
                return;
            }
            eprintln!("[flow-zoxide] {error}");
            std::process::exit(2);
        }
    };

    if let Err(error) = flow_zoxide::runtime::run_with_options(options) {
        eprintln!("[flow-zoxide] runtime failed: {error}");
        std::process::exit(1);
    }
}
