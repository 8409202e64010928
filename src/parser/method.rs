//! HTTP request methods.

use std::fmt;
use std::str::FromStr;

use crate::parser::error::Error;

/// The methods this server answers.
///
/// Parsing is a case-sensitive exact match on the wire token; anything else
/// fails to parse and is reported by the dispatcher as `501 Not
/// Implemented`. Supporting a further method is one new variant plus one
/// dispatch arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET method: Requests a representation of the specified resource.
    GET,
    /// HEAD method: Same as GET but only transfers the status line and header section.
    HEAD,
    /// POST method: Submits data to be processed to the identified resource.
    POST,
    /// BREW method: Coffee-pot signalling in the spirit of RFC 2324.
    BREW,
}

// Implement FromStr for Method
impl FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET" => Ok(Method::GET),
            "HEAD" => Ok(Method::HEAD),
            "POST" => Ok(Method::POST),
            "BREW" => Ok(Method::BREW),
            _ => Err(Error::UnsupportedMethod(s.to_string())),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}
