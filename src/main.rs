// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier
// Modifications (c) 2026 Peter Carlton

use mgeview::errors::IndexError;

fn main() -> Result<(), IndexError> {
    mgeview::run()
}
