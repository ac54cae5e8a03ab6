//! Remote resource gateways
//!
//! One `Gateway` per resource kind, all sharing the same generic
//! implementation parameterised by the kind's schema descriptor:
//!
//! | Operation | Request | 404 | other >= 400 |
//! |-----------|---------|-----|--------------|
//! | create | `POST {collection}` | `Api` | `Api` |
//! | get | `GET {collection}/{id}` | `NotFound` | `Api` |
//! | update | `PUT {collection}/{id}` | `NotFound` | `Api` |
//! | delete | `DELETE {collection}/{id}` | success | `Api` |

mod client;

pub use client::{DeleteResult, Gateway, MakeClient};
