use super::request::{read_request, RequestError};
use super::response::Response;
use super::service::UserService;
use crate::ids::ConnectionId;
use std::io::{self, BufRead, Write};
use tracing::{debug, warn};

/// Serve requests from one persistent connection until the peer hangs up.
///
/// Requests are handled strictly one after another. A malformed request line
/// gets a 400 and the loop carries on; a clean hangup returns `Ok(())`; an
/// I/O fault on the stream ends only this connection.
///
/// Every event carries `connection_id` as a field. The loop parks between
/// requests, so it must not run inside an entered span.
pub fn serve_connection<R, W>(
    reader: &mut R,
    writer: &mut W,
    service: &UserService,
    connection_id: ConnectionId,
) -> io::Result<()>
where
    R: BufRead,
    W: Write,
{
    let mut served = 0u64;
    loop {
        let response = match read_request(reader) {
            Ok(req) => {
                let response = service.call(&req);
                debug!(
                    %connection_id,
                    method = %req.method,
                    target = %req.target,
                    status = response.status.as_u16(),
                    content_length = response.content_length(),
                    "request handled"
                );
                response
            }
            Err(RequestError::ConnectionClosed) => {
                debug!(%connection_id, served, "peer closed connection");
                return Ok(());
            }
            Err(RequestError::Malformed(reason)) => {
                warn!(%connection_id, %reason, "malformed request");
                Response::bad_request("malformed request")
            }
            Err(RequestError::Io(e)) => {
                warn!(%connection_id, error = %e, served, "connection read failed");
                return Err(e);
            }
        };
        response.write_to(writer)?;
        served += 1;
    }
}
