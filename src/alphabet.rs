//! The fixed alphabet a mangled symbol name may draw from.
//!
//! The order of [`CHARSET`] is load-bearing: fragment indices in the consumer
//! refer to positions in this exact string, and [`INDEX_OF_CHAR`] is its
//! byte-value inverse. Changing the string changes the emitted tables.

/// Every character allowed in a mangled name, in table order.
pub const CHARSET: &str = "0123456789_abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ$";

/// Number of characters in [`CHARSET`].
pub const CHARSET_LEN: usize = CHARSET.len();

/// Table entry for bytes outside the alphabet.
pub const NO_INDEX: i32 = -1;

/// Reverse lookup from raw byte value to charset position, [`NO_INDEX`] for
/// bytes that are not part of the alphabet.
pub const INDEX_OF_CHAR: [i32; 256] = {
    let mut table = [NO_INDEX; 256];
    let bytes = CHARSET.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        table[bytes[i] as usize] = i as i32;
        i += 1;
    }
    table
};

/// Position of `c` in [`CHARSET`], if it is an allowed character.
pub fn charset_index(c: char) -> Option<usize> {
    CHARSET.find(c)
}

/// Whether `c` may appear in a mangled name.
pub fn is_allowed(c: char) -> bool {
    charset_index(c).is_some()
}
