fn main() {
    let host = party_swarm::core::HeadlessHost::from_env();
    if let Err(e) = host.run() {
        eprintln!("Swarm screen failed to start: {}", e);
        std::process::exit(1);
    }
}
