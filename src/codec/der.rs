//! DER encoding of ECDSA signatures.
//!
//! The encoding is the two-integer SEQUENCE used on the wire for
//! signatures: each component is a minimal big-endian integer, prefixed
//! with a `0x00` pad byte when its high bit is set so it cannot be read
//! as negative. Both components fit in 33 bytes, so every length fits a
//! single byte and the long-form length encoding is never needed.

use num_bigint::BigUint;

use crate::{
    ecdsa::Signature,
    error::{Error, Result},
};

const SEQUENCE_MARKER: u8 = 0x30;
const INTEGER_MARKER: u8 = 0x02;

/// Serializes a signature as a DER SEQUENCE of two INTEGERs.
pub fn encode(signature: &Signature) -> Vec<u8> {
    let r = encode_component(signature.r());
    let s = encode_component(signature.s());
    let mut out = Vec::with_capacity(2 + r.len() + s.len());
    out.push(SEQUENCE_MARKER);
    out.push(u8::try_from(r.len() + s.len()).expect("components fit in 33 bytes each"));
    out.extend_from_slice(&r);
    out.extend_from_slice(&s);
    out
}

fn encode_component(value: &BigUint) -> Vec<u8> {
    let mut bytes = value.to_bytes_be();
    if bytes[0] & 0x80 != 0 {
        bytes.insert(0, 0x00);
    }
    let mut out = Vec::with_capacity(2 + bytes.len());
    out.push(INTEGER_MARKER);
    out.push(u8::try_from(bytes.len()).expect("components fit in 33 bytes"));
    out.extend_from_slice(&bytes);
    out
}

/// Deserializes a signature from its DER encoding.
///
/// Every structural defect, from a wrong marker byte to a length that
/// disagrees with the input, fails with [`Error::MalformedSignature`].
pub fn decode(bytes: &[u8]) -> Result<Signature> {
    let mut reader = Reader::new(bytes);
    if reader.read_u8()? != SEQUENCE_MARKER {
        return Err(Error::MalformedSignature);
    }
    let declared = usize::from(reader.read_u8()?);
    if declared != bytes.len() - 2 {
        return Err(Error::MalformedSignature);
    }
    let r = read_component(&mut reader)?;
    let s = read_component(&mut reader)?;
    if !reader.is_done() {
        return Err(Error::MalformedSignature);
    }
    Ok(Signature::new(r, s))
}

fn read_component(reader: &mut Reader<'_>) -> Result<BigUint> {
    if reader.read_u8()? != INTEGER_MARKER {
        return Err(Error::MalformedSignature);
    }
    let len = usize::from(reader.read_u8()?);
    Ok(BigUint::from_bytes_be(reader.read(len)?))
}

/// Bounds-checked cursor over the input slice.
struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn read_u8(&mut self) -> Result<u8> {
        let byte = *self
            .bytes
            .get(self.pos)
            .ok_or(Error::MalformedSignature)?;
        self.pos += 1;
        Ok(byte)
    }

    fn read(&mut self, len: usize) -> Result<&'a [u8]> {
        let end = self
            .pos
            .checked_add(len)
            .ok_or(Error::MalformedSignature)?;
        let slice = self
            .bytes
            .get(self.pos..end)
            .ok_or(Error::MalformedSignature)?;
        self.pos = end;
        Ok(slice)
    }

    fn is_done(&self) -> bool {
        self.pos == self.bytes.len()
    }
}
