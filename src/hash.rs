/// DJB2-style identity hash: seed 5381, scanned from the last UTF-16 unit to
/// the first, `acc = acc * 33 ^ unit` with 32-bit wrapping.
///
/// The scan order and the UTF-16 units are load-bearing: they decide which
/// records collide during deduplication, so keys stay stable across runs.
pub fn identity_hash(value: &str) -> u32 {
    let units: Vec<u16> = value.encode_utf16().collect();
    let mut hash: u32 = 5381;
    for unit in units.iter().rev() {
        hash = hash.wrapping_mul(33) ^ u32::from(*unit);
    }
    hash
}
