//! QR Reference Building
//!
//! Maps a SKU to the public detail URL embedded in the product's QR code.
//! The mapping is pure and idempotent: the SKU is normalized before
//! encoding, so feeding an already-normalized SKU back in yields the same
//! URL.

/// Build the public detail URL for a SKU
///
/// The SKU is trimmed, uppercased and percent-encoded, then appended to the
/// base URL as `/product/{sku}`. Scanning the resulting code opens the
/// unauthenticated detail page directly.
pub fn build(base_url: &str, sku: &str) -> String {
    let normalized = sku.trim().to_uppercase();
    format!(
        "{}/product/{}",
        base_url.trim_end_matches('/'),
        urlencoding::encode(&normalized)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://shop.example.com";

    #[test]
    fn builds_product_detail_url() {
        assert_eq!(
            build(BASE, "CFCL-1234"),
            "https://shop.example.com/product/CFCL-1234"
        );
    }

    #[test]
    fn normalizes_before_encoding() {
        assert_eq!(build(BASE, "  cfcl-1234  "), build(BASE, "CFCL-1234"));
    }

    #[test]
    fn is_idempotent_over_normalization() {
        for sku in ["abc-1", "ABC-1", " abc-1 ", "weird sku"] {
            let normalized = sku.trim().to_uppercase();
            assert_eq!(build(BASE, &normalized), build(BASE, sku));
        }
    }

    #[test]
    fn percent_encodes_reserved_characters() {
        assert_eq!(
            build(BASE, "A B/C"),
            "https://shop.example.com/product/A%20B%2FC"
        );
    }

    #[test]
    fn tolerates_trailing_slash_in_base_url() {
        assert_eq!(
            build("https://shop.example.com/", "AB-1000"),
            "https://shop.example.com/product/AB-1000"
        );
    }

    #[test]
    fn encoded_sku_decodes_back_to_original() {
        let sku = "CAFÉ-1234".trim().to_uppercase();
        let url = build(BASE, &sku);
        let encoded = url.rsplit('/').next().unwrap();
        assert_eq!(urlencoding::decode(encoded).unwrap(), sku);
    }
}
