fn main() {
    let code = create_electron_vite_app::run_cli();
    if code != 0 {
        std::process::exit(code);
    }
}
