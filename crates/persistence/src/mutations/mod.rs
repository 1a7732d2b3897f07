// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend-agnostic mutations for the ticketing system.
//!
//! All mutations use Diesel DSL and work across all supported database
//! backends. Every mutation that affects the availability ledger runs
//! inside a single database transaction so that the capacity invariant
//! can never be observed in a half-applied state.

mod business_users;
mod catalog;
mod clients;
mod reservations;
mod tickets;

pub use business_users::*;
pub use catalog::*;
pub use clients::*;
pub use reservations::*;
pub use tickets::*;
