// ABOUTME: Document number (CPF/CNPJ) normalization helpers
// ABOUTME: Strips punctuation and any other non-digit characters from document values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Keep only ASCII digits from a document number
///
/// `"12.345.678/0001-90"` becomes `"12345678000190"`.
#[must_use]
pub fn clean_document(document: &str) -> String {
    document.chars().filter(char::is_ascii_digit).collect()
}
