/*!
## Memory Layout

Fixed positions and symbol names of the variable zone: ten reserved cells to
the left of the user zone holding an 8-bit two's-complement variable between
its `BOM`/`EOM` sentinels.

```text
position:  -10  -9  -8  -7  -6  -5  -4  -3  -2  -1   0  1  2 ...
content:   BOM  b0  b1  b2  b3  b4  b5  b6  b7  EOM  user zone
                MSB                         LSB
```

*/

use crate::lang::Symbol;
use std::rc::Rc;

pub use crate::lang::{is_system_symbol, SYM_BIT0, SYM_BIT1, SYM_BOM, SYM_EOM, SYM_MARKER};

use super::Position;

/// Position of `BOM`, the leftmost cell of the variable zone.
pub const MEM_BEGIN: Position = -10;
/// Position of `EOM`, the rightmost cell of the variable zone.
pub const MEM_END: Position = -1;
/// Position of the most significant bit.
pub const MSB_POSITION: Position = -9;
/// Position of the least significant bit.
pub const LSB_POSITION: Position = -2;
/// First position of the user zone.
pub const USER_ZONE_START: Position = 0;
/// Width of the variable in bits.
pub const MEM_BITS: usize = 8;
/// Cells a head crossing the zone has to skip: BOM + 8 bits + EOM.
pub const MEM_CELLS: usize = MEM_BITS + 2;

/// Tape position of bit `index` (0 = MSB, 7 = LSB).
pub fn bit_position(index: usize) -> Position {
    MSB_POSITION + index as Position
}

/// The symbols of `value` as stored on the tape, MSB first.
pub fn int8_bits(value: i8) -> [&'static str; MEM_BITS] {
    let unsigned = value as u8;
    let mut bits = [SYM_BIT0; MEM_BITS];
    for (index, bit) in bits.iter_mut().enumerate() {
        if unsigned & (1 << (MEM_BITS - 1 - index)) != 0 {
            *bit = SYM_BIT1;
        }
    }
    bits
}

/// The alphabet minus the five system symbols. The blank counts as a user
/// symbol: the head may rest on an unwritten cell when a variable operation
/// starts, so it needs a restore lineage of its own.
pub fn user_symbols(alphabet: &[Symbol]) -> Vec<Symbol> {
    alphabet
        .iter()
        .filter(|symbol| !is_system_symbol(symbol))
        .cloned()
        .collect()
}

/// The five system symbols in the order they extend a user alphabet.
pub fn system_symbols() -> [Symbol; 5] {
    [
        Rc::from(SYM_BOM),
        Rc::from(SYM_EOM),
        Rc::from(SYM_BIT0),
        Rc::from(SYM_BIT1),
        Rc::from(SYM_MARKER),
    ]
}
