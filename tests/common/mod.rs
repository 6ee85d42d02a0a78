//! Shared test support
//!
//! A scripted stand-in for a NETIO device: accepts one TCP connection on a
//! loopback port, sends a greeting, then answers each incoming line with
//! the next canned reply. Every received line is recorded so tests can
//! assert on the exact wire traffic. When the replies run out (or the
//! client hangs up) the connection is closed.

use std::io::{BufRead, BufReader, BufWriter, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

use netio::Config;

/// Session hash used in the default greeting
pub const HASH: &str = "12345678";

/// Default greeting: hash at columns 10..18 of the raw line
pub fn greeting() -> String {
    format!("250 HELLO {HASH} - KSHELL V1.5")
}

pub struct ScriptedDevice {
    port: u16,
    handle: JoinHandle<Vec<String>>,
}

impl ScriptedDevice {
    /// Spawn a device that sends `greeting` and then serves `replies` in order
    pub fn spawn(greeting: String, replies: Vec<String>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
        let port = listener.local_addr().expect("local addr").port();

        let handle = thread::spawn(move || {
            let mut received = Vec::new();
            let (stream, _) = match listener.accept() {
                Ok(conn) => conn,
                Err(_) => return received,
            };
            let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));
            let mut writer = BufWriter::new(stream);

            if write_line(&mut writer, &greeting).is_err() {
                return received;
            }

            let mut replies = replies.into_iter();
            loop {
                let mut line = String::new();
                match reader.read_line(&mut line) {
                    Ok(0) | Err(_) => break,
                    Ok(_) => {}
                }
                received.push(line.trim_end_matches(['\r', '\n']).to_string());

                match replies.next() {
                    Some(reply) => {
                        if write_line(&mut writer, &reply).is_err() {
                            break;
                        }
                    }
                    // Script exhausted: hang up on the client
                    None => break,
                }
            }
            received
        });

        Self { port, handle }
    }

    /// Spawn with the default greeting
    pub fn with_replies(replies: &[&str]) -> Self {
        Self::spawn(greeting(), replies.iter().map(|r| r.to_string()).collect())
    }

    /// Config pointing at this device with factory-default credentials
    pub fn config(&self) -> Config {
        Config::builder()
            .host("127.0.0.1")
            .port(self.port)
            .read_timeout_ms(2000)
            .write_timeout_ms(2000)
            .build()
    }

    /// Wait for the device to finish and return every line it received.
    ///
    /// The session talking to this device must be dropped first, otherwise
    /// the device keeps waiting for more lines.
    pub fn join(self) -> Vec<String> {
        self.handle.join().expect("device thread panicked")
    }
}

fn write_line<W: Write>(writer: &mut W, line: &str) -> std::io::Result<()> {
    writer.write_all(line.as_bytes())?;
    writer.write_all(b"\r\n")?;
    writer.flush()
}
