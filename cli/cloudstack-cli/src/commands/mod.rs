// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! CLI command implementations

pub mod account;
pub mod api;
pub mod job;
pub mod profile;
pub mod vm;
pub mod zone;

pub use account::AccountCommand;
pub use api::ApiArgs;
pub use job::JobCommand;
pub use profile::ProfileCommand;
pub use vm::VmCommand;
pub use zone::ZoneCommand;
