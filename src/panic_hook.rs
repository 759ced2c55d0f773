// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Record panics before the process goes down.

use std::any::Any;
use std::ops::Deref;
use std::panic;

use crate::Level;
use crate::Location;
use crate::Logger;

/// Install a panic hook that logs every panic as a [`Level::Fatal`] record.
///
/// The record is attributed to the panic's location and reads
/// `Fatal exception occurred: <message>`. The previously installed hook runs afterwards, so
/// the default panic output and any other hooks are preserved. Install it once, right after
/// building the logger.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use tetralog::Logger;
///
/// let logger = Arc::new(Logger::builder().build());
/// tetralog::panic_hook::install(logger.clone());
/// ```
pub fn install<L>(logger: L)
where
    L: Deref<Target = Logger> + Send + Sync + 'static,
{
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let message = payload_message(info.payload());
        let location = info.location().map(Location::from);
        logger.log_at(
            Level::Fatal,
            location,
            &format!("Fatal exception occurred: {message}"),
        );
        previous(info);
    }));
}

fn payload_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "Box<dyn Any>"
    }
}
