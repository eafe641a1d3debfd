use super::*;

#[test]
fn test_paddings_are_wire_constants() {
  assert_eq!(MIN_PADDING, 1);
  assert_eq!(MAX_PADDING, 2);
  assert_eq!(TRANSITION_CELL_SCALE, 0.25);
}

#[test]
fn test_corner_offsets_match_bit_layout() {
  for (i, offset) in CORNER_OFFSETS.iter().enumerate() {
    let i = i as i32;
    assert_eq!(*offset, IVec3::new(i & 1, (i >> 1) & 1, (i >> 2) & 1));
  }
}

#[test]
fn test_border_bits_are_distinct() {
  let bits = [
    BORDER_NEG_X,
    BORDER_POS_X,
    BORDER_NEG_Y,
    BORDER_POS_Y,
    BORDER_NEG_Z,
    BORDER_POS_Z,
  ];
  let mut seen = 0u16;
  for bit in bits {
    assert_eq!(seen & bit, 0, "border bit {bit} reused");
    seen |= bit;
  }
  assert_eq!(seen, 0x3f);
}
