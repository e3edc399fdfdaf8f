use super::connection::serve_connection;
use super::service::UserService;
use crate::ids::ConnectionId;
use may::coroutine::{self, JoinHandle};
use may::net::{TcpListener, TcpStream};
use std::io::{self, BufReader};
use std::net::{SocketAddr, ToSocketAddrs};
use std::thread;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Default stack size for connection coroutines.
pub const DEFAULT_STACK_SIZE: usize = 0x8000;

/// Listener that accepts connections and serves each one in its own
/// coroutine.
///
/// Connections share nothing but the service's record store.
pub struct HttpServer {
    service: UserService,
    stack_size: usize,
}

/// Handle to a running server
///
/// Provides methods for waiting until the server is ready, stopping it,
/// or joining the accept loop.
pub struct ServerHandle {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl ServerHandle {
    /// Address the listener is actually bound to (resolves port 0).
    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Wait for the server to be ready to accept connections
    ///
    /// Polls the server address by attempting TCP connections until successful.
    ///
    /// # Errors
    ///
    /// Returns `TimedOut` if the server doesn't accept within ~250ms (50 attempts × 5ms).
    pub fn wait_ready(&self) -> io::Result<()> {
        for _ in 0..50 {
            if std::net::TcpStream::connect(self.addr).is_ok() {
                return Ok(());
            }
            thread::sleep(Duration::from_millis(5));
        }
        Err(io::Error::new(io::ErrorKind::TimedOut, "server not ready"))
    }

    /// Stop accepting connections.
    ///
    /// Cancels the accept coroutine and waits for it to finish. Connections
    /// already accepted run until their peers hang up.
    pub fn stop(self) {
        // SAFETY: cancelling is marked unsafe by the may runtime because the
        // cancelled coroutine unwinds at its next yield point. The accept loop
        // owns nothing but the listener socket, which is released by the unwind.
        unsafe {
            self.handle.coroutine().cancel();
        }
        if self.handle.join().is_err() {
            debug!("accept loop ended by cancellation");
        }
        info!(addr = %self.addr, "listener stopped");
    }

    /// Block until the accept loop finishes (normally never).
    ///
    /// # Errors
    ///
    /// Returns an error if the accept coroutine panicked.
    pub fn join(self) -> std::thread::Result<()> {
        self.handle.join()
    }
}

impl HttpServer {
    pub fn new(service: UserService) -> Self {
        Self {
            service,
            stack_size: DEFAULT_STACK_SIZE,
        }
    }

    /// Stack size for each connection coroutine.
    #[must_use]
    pub fn with_stack_size(mut self, stack_size: usize) -> Self {
        self.stack_size = stack_size;
        self
    }

    /// Bind `addr` and start accepting connections.
    ///
    /// Binding happens before this returns, so a port of 0 is resolved and
    /// bind failures are reported here.
    ///
    /// # Errors
    ///
    /// Returns an error if the address is invalid or cannot be bound.
    pub fn start<A: ToSocketAddrs>(self, addr: A) -> io::Result<ServerHandle> {
        let addr = addr
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "invalid address"))?;
        let listener = TcpListener::bind(addr)?;
        let addr = listener.local_addr()?;
        info!(
            %addr,
            store = %self.service.store().path().display(),
            stack_size = self.stack_size,
            "listener started"
        );

        let HttpServer { service, stack_size } = self;
        // SAFETY: spawning a may coroutine is unsafe because thread-local
        // storage is shared between coroutines on the same worker. The accept
        // loop touches no thread-locals.
        let handle = unsafe {
            coroutine::Builder::new()
                .name("usersvc-listener".to_string())
                .spawn(move || accept_loop(listener, service, stack_size))?
        };
        Ok(ServerHandle { addr, handle })
    }
}

fn accept_loop(listener: TcpListener, service: UserService, stack_size: usize) {
    loop {
        match listener.accept() {
            Ok((stream, peer)) => {
                if let Err(e) = spawn_connection(stream, peer, service.clone(), stack_size) {
                    error!(%peer, error = %e, "failed to spawn connection coroutine");
                }
            }
            Err(e) => {
                error!(error = %e, "accept failed");
                coroutine::sleep(Duration::from_millis(10));
            }
        }
    }
}

fn spawn_connection(
    stream: TcpStream,
    peer: SocketAddr,
    service: UserService,
    stack_size: usize,
) -> io::Result<()> {
    let id = ConnectionId::new();
    info!(connection_id = %id, %peer, "connection accepted");

    let mut reader = BufReader::new(stream.try_clone()?);
    let mut writer = stream;
    // SAFETY: see `HttpServer::start`; connection coroutines use no
    // thread-local state of their own.
    unsafe {
        coroutine::Builder::new()
            .stack_size(stack_size)
            .spawn(move || {
                // Coroutines may resume on another worker thread after parking,
                // so no span is held entered across this call.
                match serve_connection(&mut reader, &mut writer, &service, id) {
                    Ok(()) => debug!(connection_id = %id, %peer, "connection finished"),
                    Err(e) => warn!(
                        connection_id = %id,
                        %peer,
                        error = %e,
                        "connection ended by I/O fault"
                    ),
                }
            })?;
    }
    Ok(())
}
