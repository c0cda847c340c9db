fn main() {
    let heap_size = std::env::var("AGENT_HEAP_SIZE").unwrap_or_else(|_| "4096".to_string());
    heap_size.parse::<usize>().expect("AGENT_HEAP_SIZE must be a positive integer");
    println!("cargo:rustc-env=AGENT_HEAP_SIZE={heap_size}");
    println!("cargo:rerun-if-env-changed=AGENT_HEAP_SIZE");
}
