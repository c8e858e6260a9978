use super::name::standard_table;
use super::{standard, Append, AsHeaderName, HeaderName, HeaderValue, RequestHeaders};

const fn is_send_sync<T: Send + Sync>() { }
const _: () = {
    is_send_sync::<RequestHeaders>();
    is_send_sync::<HeaderName>();
    is_send_sync::<HeaderValue>();
};

#[test]
fn standard_table_is_sorted() {
    let table = standard_table().collect::<Vec<_>>();
    for pair in table.windows(2) {
        assert!(pair[0].1 < pair[1].1, "{:?} >= {:?}", pair[0].0, pair[1].0);
    }
    for (canonical, lowercase) in table {
        assert_eq!(canonical.to_ascii_lowercase().as_bytes(), lowercase);
        let name = HeaderName::from_static(canonical);
        assert!(name.is_standard());
        assert_eq!(name.as_str(), canonical);
    }
}

macro_rules! test_name {
    ($($input:literal => $expected:expr, $standard:literal;)*) => {
        $(
            let name = HeaderName::from_bytes($input.as_bytes()).unwrap();
            assert_eq!(name.as_str(), $expected);
            assert_eq!(name.is_standard(), $standard, "{}", $input);
        )*
    };
}

#[test]
fn header_name() {
    test_name! {
        "content-type" => "Content-Type", true;
        "CONTENT-TYPE" => "Content-Type", true;
        "cOnTeNt-LeNgTh" => "Content-Length", true;
        "host" => "Host", true;
        "te" => "TE", true;
        "www-authenticate" => "WWW-Authenticate", true;
        "x-forwarded-for" => "X-Forwarded-For", true;
        "X-Request-Id" => "X-Request-Id", false;
        "accept-" => "accept-", false;
        "t" => "t", false;
    }

    assert!(HeaderName::from_bytes("").is_err());
    assert!(HeaderName::from_bytes("content type").is_err());
    assert!(HeaderName::from_bytes("host:").is_err());
    assert!(HeaderName::from_bytes("ho\r\nst").is_err());

    assert_eq!(HeaderName::from_static("HOST"), standard::HOST);
    assert_eq!(HeaderName::from_static("x-a"), HeaderName::from_static("X-A"));
    assert_ne!(HeaderName::from_static("x-a"), standard::ACCEPT);
    assert_eq!("Content-Type".standard_index(), standard::CONTENT_TYPE.standard_index());
}

#[test]
fn header_value() {
    assert!(HeaderValue::from_bytes("text/plain; charset=utf-8").is_ok());
    assert!(HeaderValue::from_bytes("a\tb").is_ok());
    assert!(HeaderValue::from_bytes("a\r\nInjected: 1").is_err());
    assert!(HeaderValue::from_bytes("a\nb").is_err());
    assert!(HeaderValue::from_bytes("a\0b").is_err());

    assert_eq!(HeaderValue::from_u64(0), "0");
    assert_eq!(HeaderValue::from_u64(1024), "1024");

    assert_eq!(HeaderValue::from_static("42").parse_u64(), Some(42));
    assert_eq!(HeaderValue::from_static("").parse_u64(), None);
    assert_eq!(HeaderValue::from_static("+4").parse_u64(), None);
    assert_eq!(HeaderValue::from_static("99999999999999999999").parse_u64(), None);

    let value = HeaderValue::from_buffer(b"  keep-alive \t\r").unwrap();
    assert_eq!(value, "keep-alive");
    assert!(value.contains_token("Keep-Alive"));
    assert!(HeaderValue::from_buffer(b" a\rb").is_none());
}

#[test]
fn request_headers() {
    let mut map = RequestHeaders::new();
    assert!(map.is_empty());

    let append = |map: &mut RequestHeaders, name: &str, value: &str| {
        map.append(
            HeaderName::from_bytes(name.to_owned()).unwrap(),
            HeaderValue::from_bytes(value.to_owned()).unwrap(),
        )
    };

    assert_eq!(append(&mut map, "Host", "example.com"), Append::Inserted);
    assert_eq!(append(&mut map, "accept", "text/html"), Append::Inserted);
    assert_eq!(append(&mut map, "ACCEPT", "text/plain"), Append::Merged);
    assert_eq!(append(&mut map, "X-Trace", "1"), Append::Inserted);
    assert_eq!(append(&mut map, "x-trace", "2"), Append::Merged);
    assert_eq!(map.len(), 3);

    assert_eq!(map.get("host").unwrap(), "example.com");
    assert_eq!(map.get(&standard::ACCEPT).unwrap(), "text/html, text/plain");
    assert_eq!(map.get_str("X-TRACE"), Some("1, 2"));
    assert!(map.get("x-missing").is_none());
    assert!(!map.contains_key(standard::COOKIE));

    let names = map.unknown_names().map(HeaderName::as_str).collect::<Vec<_>>();
    assert_eq!(names, ["X-Trace"]);

    let all = map.iter().map(|(n, _)| n).collect::<Vec<_>>();
    assert_eq!(all, ["Accept", "Host", "X-Trace"]);

    map.clear();
    assert!(map.is_empty());
    assert!(map.get("host").is_none());
}

#[test]
fn request_headers_content_length() {
    let mut map = RequestHeaders::new();
    let cl = || standard::CONTENT_LENGTH;

    assert_eq!(map.append(cl(), HeaderValue::from_static("5")), Append::Inserted);
    assert_eq!(map.append(cl(), HeaderValue::from_static("5")), Append::Merged);
    assert_eq!(map.content_length().unwrap(), "5");
    assert_eq!(map.append(cl(), HeaderValue::from_static("6")), Append::Conflict);
    assert_eq!(map.content_length().unwrap(), "5");
}

#[test]
fn request_headers_connection() {
    let mut map = RequestHeaders::new();
    assert_eq!(map.connection(), None);

    map.append(standard::CONNECTION, HeaderValue::from_static("Keep-Alive"));
    assert_eq!(map.connection(), Some(true));

    map.append(standard::CONNECTION, HeaderValue::from_static("close"));
    assert_eq!(map.connection(), Some(false));

    map.clear();
    map.append(standard::CONNECTION, HeaderValue::from_static("upgrade"));
    assert_eq!(map.connection(), None);
}
