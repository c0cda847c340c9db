//! Host entry point: bind the TCP loopback transport and run the dispatcher
//! forever. Direct analog of `main_host.c`'s `main()`
//! (`socket_connect(); gti2_dispatcher();`).

use tether::Dispatcher;
use tether::transport::tcp::TcpTransport;

const ADDR: &str = "127.0.0.1:1234";

fn main() {
    env_logger::init();

    let mut transport = TcpTransport::bind(ADDR).expect("failed to bind transport");
    let mut dispatcher = Dispatcher::new();
    if let Err(e) = dispatcher.run(&mut transport) {
        log::error!("dispatcher exited: {e}");
        std::process::exit(1);
    }
}
