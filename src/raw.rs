// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Raw access to request- and response-building primitives used internally by tweetwire.
//!
//! The functions and types exposed in this module allow you to access Twitter API functions that
//! aren't currently wrapped, or to provide parameters to Twitter that the wrappers don't
//! currently use. In return, much more knowledge of the Twitter API is required to effectively
//! use these functions.
//!
//! Most of the time, `Client::call` with a `ParamList` is all that's needed: it takes care of
//! signing, of sorting errors from successes, and of decoding. The pieces below are what it's
//! built out of, for when you need to do one of those steps yourself.
//!
//! * `RequestBuilder` assembles a request and signs it, given a consumer key and an optional
//!   token. `signature_base_string` and `sign_hmac_sha1` are the two halves of the signature, for
//!   checking one by hand.
//! * `read_body` and `classify_response` read a `hyper` response and turn error payloads into an
//!   `Error::Api`.
//! * `decode_lenient` decodes a body the way `Client::call` does, skipping mismatched fields.
//! * `MultipartForm` builds a `multipart/form-data` body for `Client::call_multipart`.

pub use crate::auth::raw::{sign_hmac_sha1, signature_base_string, RequestBuilder};
pub use crate::common::{
    classify_response, decode_lenient, percent_encode, read_body, Decoded, FieldMismatch, Headers,
    MultipartForm, ParamList, ParamValue,
};
pub use crate::transport::Transport;
