#![allow(dead_code)]

pub mod test_server {
    use std::path::{Path, PathBuf};
    use std::sync::Once;
    use usersvc::server::{HttpServer, ServerHandle, UserService};
    use usersvc::store::RecordStore;

    /// Ensures May coroutines are configured only once
    static MAY_INIT: Once = Once::new();

    pub fn setup_may_runtime() {
        MAY_INIT.call_once(|| {
            may::config().set_stack_size(0x8000);
        });
    }

    /// Test fixture with automatic setup and teardown using RAII
    ///
    /// Starts a server on an ephemeral port over a store file in a fresh
    /// temporary directory; stops the listener on drop.
    pub struct TestServer {
        handle: Option<ServerHandle>,
        store_path: PathBuf,
        _dir: tempfile::TempDir,
    }

    impl TestServer {
        pub fn start() -> Self {
            Self::start_with(|_| {})
        }

        /// Start with a store file prepared by `seed` before the listener runs.
        pub fn start_with<F: FnOnce(&Path)>(seed: F) -> Self {
            setup_may_runtime();
            let dir = tempfile::tempdir().unwrap();
            let store_path = dir.path().join("users.txt");
            seed(&store_path);

            let service = UserService::new(RecordStore::new(&store_path));
            let handle = HttpServer::new(service).start("127.0.0.1:0").unwrap();
            handle.wait_ready().unwrap();

            Self {
                handle: Some(handle),
                store_path,
                _dir: dir,
            }
        }

        pub fn addr(&self) -> std::net::SocketAddr {
            self.handle.as_ref().unwrap().local_addr()
        }

        pub fn store_path(&self) -> &Path {
            &self.store_path
        }

        /// Current store content, or `None` when the file does not exist.
        pub fn store_content(&self) -> Option<String> {
            std::fs::read_to_string(&self.store_path).ok()
        }
    }

    impl Drop for TestServer {
        fn drop(&mut self) {
            if let Some(handle) = self.handle.take() {
                handle.stop();
            }
        }
    }
}

pub mod http {
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::{Shutdown, SocketAddr, TcpStream};
    use std::time::Duration;

    /// A response read off the wire, framed by Content-Length.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct RawResponse {
        pub status: u16,
        pub status_line: String,
        pub headers: Vec<(String, String)>,
        pub body: String,
    }

    impl RawResponse {
        pub fn header(&self, name: &str) -> Option<&str> {
            self.headers
                .iter()
                .find(|(n, _)| n.eq_ignore_ascii_case(name))
                .map(|(_, v)| v.as_str())
        }

        pub fn content_length(&self) -> usize {
            self.header("content-length").unwrap().parse().unwrap()
        }
    }

    /// One persistent raw connection to the server.
    pub struct Conn {
        writer: TcpStream,
        reader: BufReader<TcpStream>,
    }

    impl Conn {
        pub fn open(addr: &SocketAddr) -> Self {
            let writer = TcpStream::connect(addr).unwrap();
            writer
                .set_read_timeout(Some(Duration::from_secs(5)))
                .unwrap();
            let reader = BufReader::new(writer.try_clone().unwrap());
            Self { writer, reader }
        }

        pub fn send(&mut self, raw: &str) {
            self.writer.write_all(raw.as_bytes()).unwrap();
            self.writer.flush().unwrap();
        }

        /// Close the write half so the server sees end of stream.
        pub fn finish_writing(&mut self) {
            self.writer.shutdown(Shutdown::Write).unwrap();
        }

        pub fn read_response(&mut self, head: bool) -> RawResponse {
            let status_line = self.line();
            let status = status_line
                .split_whitespace()
                .nth(1)
                .unwrap_or("0")
                .parse()
                .unwrap();
            let mut headers = Vec::new();
            loop {
                let line = self.line();
                if line.is_empty() {
                    break;
                }
                let (name, value) = line.split_once(':').unwrap();
                headers.push((name.trim().to_string(), value.trim().to_string()));
            }
            let mut resp = RawResponse {
                status,
                status_line,
                headers,
                body: String::new(),
            };
            if !head {
                let mut body = vec![0u8; resp.content_length()];
                self.reader.read_exact(&mut body).unwrap();
                resp.body = String::from_utf8(body).unwrap();
            }
            resp
        }

        pub fn get(&mut self, target: &str) -> RawResponse {
            self.send(&format!("GET {target} HTTP/1.1\r\nHost: localhost\r\n\r\n"));
            self.read_response(false)
        }

        pub fn head(&mut self, target: &str) -> RawResponse {
            self.send(&format!("HEAD {target} HTTP/1.1\r\nHost: localhost\r\n\r\n"));
            self.read_response(true)
        }

        pub fn post(&mut self, body: &str) -> RawResponse {
            self.with_body("POST", "/users", body)
        }

        pub fn put(&mut self, body: &str) -> RawResponse {
            self.with_body("PUT", "/users", body)
        }

        pub fn delete(&mut self, id: &str) -> RawResponse {
            self.send(&format!(
                "DELETE /users/{id} HTTP/1.1\r\nHost: localhost\r\n\r\n"
            ));
            self.read_response(false)
        }

        pub fn with_body(&mut self, method: &str, target: &str, body: &str) -> RawResponse {
            self.send(&format!(
                "{method} {target} HTTP/1.1\r\n\
                 Host: localhost\r\n\
                 Content-Type: application/json\r\n\
                 Content-Length: {}\r\n\
                 Connection: keep-alive\r\n\r\n{body}",
                body.len()
            ));
            self.read_response(false)
        }

        /// Whether the server has closed its side (read returns EOF).
        pub fn at_eof(&mut self) -> bool {
            let mut buf = [0u8; 1];
            matches!(self.reader.read(&mut buf), Ok(0))
        }

        fn line(&mut self) -> String {
            let mut line = String::new();
            self.reader.read_line(&mut line).unwrap();
            line.trim_end_matches(['\r', '\n']).to_string()
        }
    }

    /// Build a record line in the store format.
    pub fn user_line(id: &str, name: &str, address: &str, tel: &str, age: &str) -> String {
        format!(
            r#"{{"id":"{id}","name":"{name}","address":"{address}","tel":"{tel}","age":"{age}"}}"#
        )
    }
}
