//! Item tag (EPC) decoding
//!
//! Turns a serialized or lot-level item tag into the product identity it
//! belongs to. GS1 tags become a GTIN-14; tags minted by the trace service
//! under a non-GS1 prefix become a product class URN.

/// GS1 serialized item
pub const URN_GS1_SGTIN: &str = "urn:epc:id:sgtin:";
/// GS1 serialized item pattern
pub const URN_PAT_SGTIN: &str = "urn:epc:idpat:sgtin:";
/// GS1 lot
pub const URN_GS1_LGTIN: &str = "urn:epc:class:lgtin:";
/// Trace service serialized item
pub const URN_IFT_SGTIN: &str = "urn:ibm:ift:product:serial:obj:";
/// Trace service lot
pub const URN_IFT_LGTIN: &str = "urn:ibm:ift:product:lot:class:";
/// Product class URN used for non-GS1 identities
pub const URN_IFT_PRODUCT_CLASS: &str = "urn:ibm:ift:product:class:";

const TAG_PREFIXES: [&str; 5] = [
    URN_GS1_SGTIN,
    URN_PAT_SGTIN,
    URN_GS1_LGTIN,
    URN_IFT_SGTIN,
    URN_IFT_LGTIN,
];

/// Product identity decoded from an item tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductIdentity {
    pub gtin: String,
}

/// Decode an item tag into its product identity
///
/// Returns None for tags that do not identify a product (SSCCs, malformed tags).
pub fn decode_item_tag(tag: &str) -> Option<ProductIdentity> {
    let body = TAG_PREFIXES
        .iter()
        .find_map(|prefix| tag.strip_prefix(prefix))?;

    let mut parts = body.split('.');
    let company_prefix = parts.next().filter(|p| !p.is_empty())?;
    let item_ref = parts.next().filter(|p| !p.is_empty())?;
    // serial or lot
    parts.next().filter(|p| !p.is_empty())?;
    if parts.next().is_some() {
        return None;
    }

    let gtin = gs1_gtin(company_prefix, item_ref).unwrap_or_else(|| {
        format!("{}{}.{}", URN_IFT_PRODUCT_CLASS, company_prefix, item_ref)
    });

    Some(ProductIdentity { gtin })
}

/// Build a GTIN-14 from a GS1 company prefix and an indicator-led item reference
fn gs1_gtin(company_prefix: &str, item_ref: &str) -> Option<String> {
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(company_prefix)
        || !all_digits(item_ref)
        || company_prefix.len() + item_ref.len() != 13
    {
        return None;
    }

    let (indicator, item) = item_ref.split_at(1);
    let mut gtin = format!("{}{}{}", indicator, company_prefix, item);
    gtin.push(check_digit(&gtin));
    Some(gtin)
}

/// GS1 mod-10 check digit; weights alternate 3,1 from the rightmost digit
fn check_digit(digits: &str) -> char {
    let sum: u32 = digits
        .bytes()
        .rev()
        .enumerate()
        .map(|(i, b)| {
            let d = u32::from(b - b'0');
            if i % 2 == 0 { d * 3 } else { d }
        })
        .sum();
    char::from(b'0' + ((10 - sum % 10) % 10) as u8)
}
