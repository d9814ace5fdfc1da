use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

use canvas_grader::{GraderError, HttpTransport, Transport};
use reqwest::StatusCode;
use secrecy::SecretString;

struct Captured {
    head: String,
    body: String,
}

/// Serves a single request on a loopback port and hands back what arrived.
fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<Captured>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
    let base = format!("http://{}", listener.local_addr().expect("local addr"));

    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().expect("accept");
        let mut reader = BufReader::new(stream);

        let mut head = String::new();
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).expect("read header line");
            if line == "\r\n" || line.is_empty() {
                break;
            }
            head.push_str(&line.to_ascii_lowercase());
        }

        let content_length = head
            .lines()
            .find_map(|l| l.strip_prefix("content-length:"))
            .map(|v| v.trim().parse::<usize>().expect("content length"))
            .unwrap_or(0);
        let mut raw_body = vec![0; content_length];
        reader.read_exact(&mut raw_body).expect("read body");

        let response = format!(
            "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        let mut stream = reader.into_inner();
        stream.write_all(response.as_bytes()).expect("write response");
        stream.flush().expect("flush");

        Captured {
            head,
            body: String::from_utf8(raw_body).expect("utf8 body"),
        }
    });

    (base, handle)
}

fn form(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn sends_bearer_token_and_urlencoded_form() -> anyhow::Result<()> {
    let (base, server) = serve_once("200 OK", r#"{"id": 42}"#);
    let transport = HttpTransport::new(&SecretString::from("s3cret-token"))?;

    let response = transport.post_form(
        &format!("{base}/api/v1/courses/1/assignments/42/submissions/update_grades"),
        &form(&[
            ("grade_data[sis_id:123][posted_grade]", "95"),
            ("grade_data[sis_id:123][text_comment]", "great work"),
        ]),
    )?;
    let captured = server.join().expect("server thread");

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, r#"{"id": 42}"#);
    assert!(captured.head.starts_with(
        "post /api/v1/courses/1/assignments/42/submissions/update_grades http/1.1"
    ));
    assert!(captured.head.contains("authorization: bearer s3cret-token"));
    assert!(
        captured
            .head
            .contains("content-type: application/x-www-form-urlencoded")
    );
    assert_eq!(
        captured.body,
        "grade_data%5Bsis_id%3A123%5D%5Bposted_grade%5D=95\
         &grade_data%5Bsis_id%3A123%5D%5Btext_comment%5D=great+work"
    );
    Ok(())
}

#[test]
fn empty_form_is_still_posted() -> anyhow::Result<()> {
    let (base, server) = serve_once("200 OK", "{}");
    let transport = HttpTransport::new(&SecretString::from("token"))?;

    let response = transport.post_form(&format!("{base}/update_grades"), &[])?;
    let captured = server.join().expect("server thread");

    assert!(response.status.is_success());
    assert!(captured.head.starts_with("post /update_grades"));
    assert!(captured.body.is_empty());
    Ok(())
}

#[test]
fn error_status_is_returned_with_body() -> anyhow::Result<()> {
    let (base, server) = serve_once("401 Unauthorized", r#"{"errors":"invalid token"}"#);
    let transport = HttpTransport::new(&SecretString::from("expired"))?;

    let response = transport.post_form(&format!("{base}/assignments"), &form(&[("a", "b")]))?;
    server.join().expect("server thread");

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    match response.into_success_body() {
        Err(GraderError::RemoteApi { status, body }) => {
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert_eq!(body, r#"{"errors":"invalid token"}"#);
        }
        other => panic!("unexpected result: {other:?}"),
    }
    Ok(())
}

#[test]
fn refused_connection_is_a_transport_error() -> anyhow::Result<()> {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        listener.local_addr()?.port()
    };
    let transport = HttpTransport::new(&SecretString::from("token"))?;

    let err = transport
        .post_form(&format!("http://127.0.0.1:{port}/assignments"), &[])
        .unwrap_err();

    assert!(matches!(err, GraderError::Transport(_)));
    Ok(())
}
