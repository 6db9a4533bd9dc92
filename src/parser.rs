use core::convert::TryFrom;

use nom::{
    bytes::complete::{tag, take},
    combinator::map_res,
    number::complete::be_u8,
    IResult,
};

use crate::iso15693::{Uid, BLOCK_LEN, UID_LEN};

/// Response flags byte of an answer without the error flag.
const FLAGS_OK: &[u8] = &[0x00];

#[derive(Debug, PartialEq)]
pub(crate) struct Inventory {
    pub(crate) dsfid: u8,
    pub(crate) uid: Uid,
}

// flags(0) DSFID UID[8], UID least significant byte first
pub(crate) fn inventory_response(input: &[u8]) -> IResult<&[u8], Inventory> {
    let (input, _) = tag(FLAGS_OK)(input)?;
    let (input, dsfid) = be_u8(input)?;
    let (input, wire) = map_res(take(UID_LEN), |b: &[u8]| <[u8; UID_LEN]>::try_from(b))(input)?;
    Ok((input, Inventory {
        dsfid,
        uid: Uid::from_wire(&wire),
    }))
}

// flags(0) DATA[4]
pub(crate) fn read_block_response(input: &[u8]) -> IResult<&[u8], [u8; BLOCK_LEN]> {
    let (input, _) = tag(FLAGS_OK)(input)?;
    map_res(take(BLOCK_LEN), |b: &[u8]| <[u8; BLOCK_LEN]>::try_from(b))(input)
}
