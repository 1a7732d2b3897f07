// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend-agnostic queries for the ticketing system.
//!
//! All queries use Diesel DSL and work across all supported database
//! backends.

mod availability;
mod business_users;
mod offerings;
mod reservations;
mod tickets;

pub use availability::*;
pub use business_users::*;
pub use offerings::*;
pub use reservations::*;
pub use tickets::*;
