use super::{ClientResponse, UserClient};
use crate::model::UserRecord;
use anyhow::Result;
use std::io::Write;

/// One request/response exchange of the script.
#[derive(Debug, Clone)]
pub struct Exchange {
    /// What was sent, e.g. `GET /users HTTP/1.1`
    pub label: String,
    pub response: ClientResponse,
}

/// Run the fixed request sequence over one connection, printing every
/// exchange to `out`.
///
/// Creates three users, lists and queries them, issues HEAD requests,
/// updates the first user, tries to update an unknown id, deletes the
/// second user, lists again and finishes with three requests the server
/// must refuse (`GET /users?`, `POST /invalid`, `PATCH /users`).
pub fn run_script<W: Write>(client: &mut UserClient, out: &mut W) -> Result<Vec<Exchange>> {
    let mut log = Vec::new();

    let users = [
        UserRecord::with_generated_id("bae", "Seoul", "010-0101-0101", "10"),
        UserRecord::with_generated_id("lee", "Busan", "010-1212-1212", "21"),
        UserRecord::with_generated_id("kang", "Seoul", "010-2323-2323", "22"),
    ];
    for user in &users {
        let resp = client.create(user)?;
        record(&mut log, out, "POST /users HTTP/1.1", resp)?;
    }

    let resp = client.list_all()?;
    record(&mut log, out, "GET /users HTTP/1.1", resp)?;

    for (key, value) in [
        ("name", "kim"),
        ("address", "Jeju"),
        ("tel", "010-2222-2222"),
        ("age", "22"),
    ] {
        let resp = client.list_by(key, value)?;
        record(&mut log, out, &format!("GET /users?{key}={value} HTTP/1.1"), resp)?;
    }

    for target in ["/users", "/users?name=kim"] {
        let resp = client.head(target)?;
        record(&mut log, out, &format!("HEAD {target} HTTP/1.1"), resp)?;
    }

    let renamed = UserRecord::new(users[0].id.clone(), "yang", "Seoul", "010-9999-9999", "23");
    let resp = client.update(&renamed)?;
    record(&mut log, out, "PUT /users HTTP/1.1", resp)?;

    let ghost = UserRecord::new("abcdefg", "hwang", "Gangwon", "010-1234-5678", "100");
    let resp = client.update(&ghost)?;
    record(&mut log, out, "PUT /users HTTP/1.1", resp)?;

    let resp = client.delete(&users[1].id)?;
    record(&mut log, out, &format!("DELETE /users/{} HTTP/1.1", users[1].id), resp)?;

    let resp = client.list_all()?;
    record(&mut log, out, "GET /users HTTP/1.1", resp)?;

    for line in ["GET /users? HTTP/1.1", "POST /invalid HTTP/1.1", "PATCH /users HTTP/1.1"] {
        let resp = client.send_raw(line)?;
        record(&mut log, out, line, resp)?;
    }

    writeln!(out, "all requests sent")?;
    Ok(log)
}

fn record<W: Write>(
    log: &mut Vec<Exchange>,
    out: &mut W,
    label: &str,
    response: ClientResponse,
) -> Result<()> {
    writeln!(out, "[{label}] response:")?;
    writeln!(out, "{response}")?;
    writeln!(out)?;
    log.push(Exchange {
        label: label.to_string(),
        response,
    });
    Ok(())
}
