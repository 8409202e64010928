//! minihttpd, a minimal HTTP/1.0 file server.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;
use log::{error, warn};

use minihttpd_rs::{HttpServer, MimeTable, ServerConfig};

/// Minimal HTTP/1.0 file server
#[derive(Debug, Parser)]
#[command(name = "minihttpd", version, about)]
struct Args {
    /// MIME table source file (default: ./mime.types, then a built-in table)
    #[arg(long, env = "MINIHTTPD_MIME")]
    mime: Option<PathBuf>,

    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:6789", env = "MINIHTTPD_ADDR")]
    addr: SocketAddr,

    /// Directory served as the web root
    #[arg(long, default_value = ".", env = "MINIHTTPD_ROOT")]
    root: PathBuf,

    /// Chunk size for streaming file bodies
    #[arg(long, default_value = "1024", env = "MINIHTTPD_CHUNK_SIZE")]
    chunk_size: usize,
}

impl Args {
    /// Parse the command line, treating a bad one as a warning rather than
    /// a fatal condition: the server then runs with its defaults.
    fn parse_lenient() -> Self {
        match Args::try_parse() {
            Ok(args) => args,
            Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
                let _ = e.print();
                std::process::exit(0);
            }
            Err(e) => {
                warn!("Invalid arguments, ignoring them: {e}");
                Args::parse_from(["minihttpd"])
            }
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let args = Args::parse_lenient();
    let mime = MimeTable::load(args.mime.as_deref()).await;
    let config = ServerConfig {
        addr: args.addr,
        root: args.root,
        chunk_size: args.chunk_size,
    };

    // A failure to bind is the only fatal condition; everything after the
    // accept loop starts is isolated per connection.
    let server = HttpServer::new(config, mime);
    if let Err(e) = server.start().await {
        error!("Fatal: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
