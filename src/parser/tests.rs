//! Tests for the request parser.

#[cfg(test)]
mod parser_tests {
    use tokio::io::BufReader;

    use crate::parser::{read_request, Error, Incoming, Method, Request};

    async fn read(head: &[u8]) -> Result<Incoming, Error> {
        let mut reader = BufReader::new(head);
        read_request(&mut reader).await
    }

    fn expect_request(incoming: Incoming) -> Request {
        match incoming {
            Incoming::Request(request) => request,
            other => panic!("expected a valid request, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_parse_simple_get() {
        let incoming = read(b"GET /index.html HTTP/1.0\r\n\r\n").await.unwrap();
        let request = expect_request(incoming);

        assert_eq!(request.method, "GET");
        assert_eq!(request.target, "/index.html");
        assert_eq!(request.version, "HTTP/1.0");
        assert!(request.headers.is_empty());
        assert!(!request.lossy);
    }

    #[tokio::test]
    async fn test_parse_request_with_headers() {
        let incoming = read(
            b"GET / HTTP/1.0\r\nHost: localhost:6789\r\nUser-Agent: curl/8.5\r\n\r\n",
        )
        .await
        .unwrap();
        let request = expect_request(incoming);

        assert_eq!(request.headers.get("Host"), Some("localhost:6789"));
        assert_eq!(request.headers.get("User-Agent"), Some("curl/8.5"));
        assert_eq!(request.user_agent(), Some("curl/8.5"));
    }

    #[tokio::test]
    async fn test_header_names_keep_working_with_wire_colon() {
        // On the wire the name token still carries its colon; reads with any
        // casing must find the same value.
        let incoming = read(b"GET / HTTP/1.0\r\nUsEr-AgEnT: tester\r\n\r\n")
            .await
            .unwrap();
        let request = expect_request(incoming);

        assert_eq!(request.headers.get("user-agent:"), Some("tester"));
        assert_eq!(request.headers.get("USER-AGENT"), Some("tester"));
    }

    #[tokio::test]
    async fn test_duplicate_headers_last_wins() {
        let incoming = read(
            b"GET / HTTP/1.0\r\nCustom: first\r\nCustom: second\r\n\r\n",
        )
        .await
        .unwrap();
        let request = expect_request(incoming);

        assert_eq!(request.headers.get("Custom"), Some("second"));
        assert_eq!(request.headers.len(), 1);
    }

    #[tokio::test]
    async fn test_header_without_separator_is_dropped() {
        let incoming = read(b"GET / HTTP/1.0\r\nNoSeparator\r\nHost: here\r\n\r\n")
            .await
            .unwrap();
        let request = expect_request(incoming);

        assert_eq!(request.headers.len(), 1);
        assert_eq!(request.headers.get("Host"), Some("here"));
    }

    #[tokio::test]
    async fn test_header_without_value_is_dropped() {
        let incoming = read(b"GET / HTTP/1.0\r\nX-Empty: \r\n\r\n").await.unwrap();
        let request = expect_request(incoming);

        assert!(request.headers.is_empty());
    }

    #[tokio::test]
    async fn test_two_field_request_line_is_malformed() {
        let incoming = read(b"GET /index.html\r\n\r\n").await.unwrap();

        assert!(matches!(incoming, Incoming::Malformed { ref line, .. } if line == "GET /index.html"));
    }

    #[tokio::test]
    async fn test_four_field_request_line_is_malformed() {
        let incoming = read(b"GET / HTTP/1.0 surplus\r\n\r\n").await.unwrap();

        assert!(matches!(incoming, Incoming::Malformed { .. }));
    }

    #[tokio::test]
    async fn test_empty_request_line_is_malformed() {
        let incoming = read(b"\r\n\r\n").await.unwrap();

        assert!(matches!(incoming, Incoming::Malformed { ref line, .. } if line.is_empty()));
    }

    #[tokio::test]
    async fn test_malformed_line_still_collects_headers() {
        let incoming = read(b"BROKEN\r\nUser-Agent: tester\r\n\r\n").await.unwrap();

        match incoming {
            Incoming::Malformed { headers, .. } => {
                assert_eq!(headers.get("User-Agent"), Some("tester"));
            }
            other => panic!("expected a malformed head, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_request_line_with_extra_whitespace() {
        let incoming = read(b"GET  /path   HTTP/1.0\r\n\r\n").await.unwrap();
        let request = expect_request(incoming);

        assert_eq!(request.method, "GET");
        assert_eq!(request.target, "/path");
        assert_eq!(request.version, "HTTP/1.0");
    }

    #[tokio::test]
    async fn test_bare_lf_line_endings() {
        let incoming = read(b"GET / HTTP/1.0\nHost: localhost\n\n").await.unwrap();
        let request = expect_request(incoming);

        assert_eq!(request.headers.get("Host"), Some("localhost"));
    }

    #[tokio::test]
    async fn test_empty_stream_is_truncated() {
        let result = read(b"").await;

        assert!(matches!(result, Err(Error::TruncatedHead)));
    }

    #[tokio::test]
    async fn test_eof_before_blank_line_is_truncated() {
        let result = read(b"GET / HTTP/1.0\r\nHost: localhost\r\n").await;

        assert!(matches!(result, Err(Error::TruncatedHead)));
    }

    #[tokio::test]
    async fn test_invalid_utf8_marks_head_lossy() {
        let incoming = read(b"GET / HTTP/1.0\r\nX-Junk: \xff\xfe\r\n\r\n")
            .await
            .unwrap();
        let request = expect_request(incoming);

        assert!(request.lossy);
        assert_eq!(request.method, "GET");
    }

    #[test]
    fn test_method_parse_is_case_sensitive() {
        assert_eq!("GET".parse::<Method>().unwrap(), Method::GET);
        assert_eq!("HEAD".parse::<Method>().unwrap(), Method::HEAD);
        assert_eq!("POST".parse::<Method>().unwrap(), Method::POST);
        assert_eq!("BREW".parse::<Method>().unwrap(), Method::BREW);

        assert!(matches!(
            "get".parse::<Method>(),
            Err(Error::UnsupportedMethod(m)) if m == "get"
        ));
        assert!(matches!(
            "PUT".parse::<Method>(),
            Err(Error::UnsupportedMethod(_))
        ));
    }

    #[test]
    fn test_method_display() {
        assert_eq!(Method::GET.to_string(), "GET");
        assert_eq!(Method::HEAD.to_string(), "HEAD");
        assert_eq!(Method::POST.to_string(), "POST");
        assert_eq!(Method::BREW.to_string(), "BREW");
    }
}
