fn main() {
    env_logger::init();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = spadec_drv::run(std::env::args(), &mut out) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
