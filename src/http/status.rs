use std::num::NonZeroU16;

/// HTTP [Status Code][rfc].
///
/// The set of status codes is closed, every value carries its reason phrase so the status line
/// can be written without formatting.
///
/// [rfc]: <https://datatracker.ietf.org/doc/html/rfc9110#name-status-codes>
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct StatusCode(NonZeroU16);

impl Default for StatusCode {
    #[inline]
    fn default() -> Self {
        Self::OK
    }
}

macro_rules! status_codes {
    (
        $(
            $(#[$doc:meta])*
            $int:literal $id:ident $msg:literal;
        )*
    ) => {
        impl StatusCode {
            $(
                $(#[$doc])*
                pub const $id: Self = Self(NonZeroU16::new($int).unwrap());
            )*

            /// Create [`StatusCode`] from its numeric value.
            ///
            /// Returns `None` if the code is not in the supported set.
            pub const fn from_u16(code: u16) -> Option<Self> {
                match code {
                    $(
                        $int => Some(Self::$id),
                    )*
                    _ => None,
                }
            }

            /// Returns status code value, e.g: `200`.
            #[inline]
            pub const fn as_u16(&self) -> u16 {
                self.0.get()
            }

            /// Returns status code and reason as string slice, e.g: `"200 OK"`.
            #[inline]
            pub const fn as_str(&self) -> &'static str {
                match self.0.get() {
                    $(
                        $int => concat!(stringify!($int), " ", $msg),
                    )*
                    _ => unreachable!(),
                }
            }

            /// Returns the status line after the version, e.g: `" 200 OK\r\n"`.
            #[inline]
            pub(crate) const fn line(&self) -> &'static [u8] {
                match self.0.get() {
                    $(
                        $int => concat!(" ", stringify!($int), " ", $msg, "\r\n").as_bytes(),
                    )*
                    _ => unreachable!(),
                }
            }

            /// Returns the reason phrase, e.g: `"OK"`.
            #[inline]
            pub const fn reason(&self) -> &'static str {
                match self.0.get() {
                    $(
                        $int => $msg,
                    )*
                    _ => unreachable!(),
                }
            }
        }
    };
}

status_codes! {
    /// `100`. The client should continue the request.
    100 CONTINUE "Continue";
    /// `101`. The server is switching to the protocol requested by the `Upgrade` header.
    101 SWITCHING_PROTOCOLS "Switching Protocols";
    /// `200`. The request succeeded.
    200 OK "OK";
    /// `201`. The request succeeded, and a new resource was created as a result.
    201 CREATED "Created";
    /// `202`. The request has been received but not yet acted upon.
    202 ACCEPTED "Accepted";
    /// `204`. There is no content to send for this request.
    204 NO_CONTENT "No Content";
    /// `206`. Only part of the resource is sent, as described by `Content-Range`.
    206 PARTIAL_CONTENT "Partial Content";
    /// `301`. The target resource has been assigned a new permanent URI.
    301 MOVED_PERMANENTLY "Moved Permanently";
    /// `302`. The target resource resides temporarily under a different URI.
    302 FOUND "Found";
    /// `303`. The client should get the resource at another URI with a GET request.
    303 SEE_OTHER "See Other";
    /// `304`. The cached representation is still valid.
    304 NOT_MODIFIED "Not Modified";
    /// `307`. The target resource resides temporarily under a different URI, keep the method.
    307 TEMPORARY_REDIRECT "Temporary Redirect";
    /// `308`. The target resource has a new permanent URI, keep the method.
    308 PERMANENT_REDIRECT "Permanent Redirect";
    /// `400`. The request is malformed.
    400 BAD_REQUEST "Bad Request";
    /// `401`. The request lacks valid authentication credentials.
    401 UNAUTHORIZED "Unauthorized";
    /// `403`. The client is known but not allowed to access the resource.
    403 FORBIDDEN "Forbidden";
    /// `404`. The server cannot find the requested resource.
    404 NOT_FOUND "Not Found";
    /// `405`. The method is known but not supported by the target resource.
    405 METHOD_NOT_ALLOWED "Method Not Allowed";
    /// `406`. No representation matches the client's content negotiation.
    406 NOT_ACCEPTABLE "Not Acceptable";
    /// `408`. The server timed out waiting for the request.
    408 REQUEST_TIMEOUT "Request Timeout";
    /// `409`. The request conflicts with the current state of the resource.
    409 CONFLICT "Conflict";
    /// `410`. The resource is gone and will not come back.
    410 GONE "Gone";
    /// `411`. The server requires a `Content-Length` header.
    411 LENGTH_REQUIRED "Length Required";
    /// `412`. A precondition in the request headers was not met.
    412 PRECONDITION_FAILED "Precondition Failed";
    /// `413`. The request content is larger than the server is willing to process.
    413 CONTENT_TOO_LARGE "Content Too Large";
    /// `414`. The request target is longer than the server is willing to interpret.
    414 URI_TOO_LONG "URI Too Long";
    /// `415`. The media type of the request content is not supported.
    415 UNSUPPORTED_MEDIA_TYPE "Unsupported Media Type";
    /// `422`. The request content is well formed but cannot be processed.
    422 UNPROCESSABLE_CONTENT "Unprocessable Content";
    /// `429`. The client has sent too many requests in a given amount of time.
    429 TOO_MANY_REQUESTS "Too Many Requests";
    /// `431`. The request header fields are too large.
    431 REQUEST_HEADER_FIELDS_TOO_LARGE "Request Header Fields Too Large";
    /// `500`. The server encountered an unexpected condition.
    500 INTERNAL_SERVER_ERROR "Internal Server Error";
    /// `501`. The server does not support the functionality required.
    501 NOT_IMPLEMENTED "Not Implemented";
    /// `502`. The upstream server sent an invalid response.
    502 BAD_GATEWAY "Bad Gateway";
    /// `503`. The server is not ready to handle the request.
    503 SERVICE_UNAVAILABLE "Service Unavailable";
    /// `504`. The upstream server did not respond in time.
    504 GATEWAY_TIMEOUT "Gateway Timeout";
    /// `505`. The HTTP major version of the request is not supported.
    505 HTTP_VERSION_NOT_SUPPORTED "HTTP Version Not Supported";
}

impl StatusCode {
    /// Returns `true` if a response with this status never carries content.
    #[inline]
    pub const fn is_bodiless(&self) -> bool {
        matches!(self.0.get(), 100..=199 | 204 | 304)
    }
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Debug for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_tuple("StatusCode").field(&self.as_str()).finish()
    }
}
