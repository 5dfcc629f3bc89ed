// Entregas
// Copyright 2025 The Entregas Authors
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! Test utilities for the REST API.

use crate::driver::testutils::TestContext as DriverTestContext;
use crate::rest::app;
use axum::Router;
use std::ops::Deref;

/// State of a running test.
///
/// Gives access to the helpers of the driver's test context to prepare and inspect the data
/// behind the API.
pub(crate) struct TestContext {
    /// Context of the driver backing the app.
    driver_context: DriverTestContext,

    /// The app under test.
    app: Router,
}

impl TestContext {
    /// Initializes the REST app backed by an empty in-memory database.
    pub(crate) async fn setup() -> Self {
        let driver_context = DriverTestContext::setup().await;
        let app = app(driver_context.driver());
        Self { driver_context, app }
    }

    /// Returns a copy of the router for the app.
    pub(crate) fn app(&self) -> Router {
        self.app.clone()
    }

    /// Consumes the context and returns the router for the app.
    pub(crate) fn into_app(self) -> Router {
        self.app
    }
}

impl Deref for TestContext {
    type Target = DriverTestContext;

    fn deref(&self) -> &Self::Target {
        &self.driver_context
    }
}
