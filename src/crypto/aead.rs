//! AES-CCM sealing and opening.
//!
//! The `ccm` crate fixes key, tag and nonce sizes at the type level. The
//! runtime sizes are resolved here, one level at a time, into a concrete
//! `Ccm<Aes*, Tag, Nonce>`. Output is `ciphertext || tag`.

use aes::cipher::{BlockCipher, BlockEncrypt, BlockSizeUser};
use aes::{Aes128, Aes192, Aes256};
use ccm::aead::generic_array::{ArrayLength, GenericArray};
use ccm::aead::{Aead, KeyInit, Payload};
use ccm::aead::consts::{U4, U6, U7, U8, U9, U10, U11, U12, U13, U14, U16};
use ccm::{Ccm, NonceSize, TagSize as CcmTagSize};

use super::PrimitiveError;
use crate::validate::TagSize;

#[derive(Debug, Clone, Copy)]
enum Direction {
    Seal,
    Open,
}

struct Input<'a> {
    key: &'a [u8],
    iv: &'a [u8],
    aad: &'a [u8],
    data: &'a [u8],
}

/// Encrypt and authenticate `plaintext`, binding `aad` into the tag.
pub fn seal(
    key: &[u8],
    iv: &[u8],
    aad: &[u8],
    tag: TagSize,
    plaintext: &[u8],
) -> Result<Vec<u8>, PrimitiveError> {
    let input = Input {
        key,
        iv,
        aad,
        data: plaintext,
    };
    by_key(Direction::Seal, tag, &input)
}

/// Verify and decrypt `ciphertext`; fails closed on any tag mismatch.
pub fn open(
    key: &[u8],
    iv: &[u8],
    aad: &[u8],
    tag: TagSize,
    ciphertext: &[u8],
) -> Result<Vec<u8>, PrimitiveError> {
    let input = Input {
        key,
        iv,
        aad,
        data: ciphertext,
    };
    by_key(Direction::Open, tag, &input)
}

fn by_key(dir: Direction, tag: TagSize, input: &Input<'_>) -> Result<Vec<u8>, PrimitiveError> {
    match input.key.len() {
        16 => by_tag::<Aes128>(dir, tag, input),
        24 => by_tag::<Aes192>(dir, tag, input),
        32 => by_tag::<Aes256>(dir, tag, input),
        n => Err(PrimitiveError::KeyLength(n)),
    }
}

fn by_tag<C>(dir: Direction, tag: TagSize, input: &Input<'_>) -> Result<Vec<u8>, PrimitiveError>
where
    C: BlockCipher + BlockSizeUser<BlockSize = U16> + BlockEncrypt + KeyInit,
{
    match tag {
        TagSize::Bits32 => by_nonce::<C, U4>(dir, input),
        TagSize::Bits48 => by_nonce::<C, U6>(dir, input),
        TagSize::Bits64 => by_nonce::<C, U8>(dir, input),
        TagSize::Bits80 => by_nonce::<C, U10>(dir, input),
        TagSize::Bits96 => by_nonce::<C, U12>(dir, input),
        TagSize::Bits112 => by_nonce::<C, U14>(dir, input),
        TagSize::Bits128 => by_nonce::<C, U16>(dir, input),
    }
}

fn by_nonce<C, M>(dir: Direction, input: &Input<'_>) -> Result<Vec<u8>, PrimitiveError>
where
    C: BlockCipher + BlockSizeUser<BlockSize = U16> + BlockEncrypt + KeyInit,
    M: ArrayLength<u8> + CcmTagSize,
{
    match input.iv.len() {
        7 => run::<C, M, U7>(dir, input),
        8 => run::<C, M, U8>(dir, input),
        9 => run::<C, M, U9>(dir, input),
        10 => run::<C, M, U10>(dir, input),
        11 => run::<C, M, U11>(dir, input),
        12 => run::<C, M, U12>(dir, input),
        13 => run::<C, M, U13>(dir, input),
        n => Err(PrimitiveError::NonceLength(n)),
    }
}

fn run<C, M, N>(dir: Direction, input: &Input<'_>) -> Result<Vec<u8>, PrimitiveError>
where
    C: BlockCipher + BlockSizeUser<BlockSize = U16> + BlockEncrypt + KeyInit,
    M: ArrayLength<u8> + CcmTagSize,
    N: ArrayLength<u8> + NonceSize,
{
    let cipher = Ccm::<C, M, N>::new_from_slice(input.key)
        .map_err(|_| PrimitiveError::KeyLength(input.key.len()))?;
    let nonce = GenericArray::from_slice(input.iv);
    let payload = Payload {
        msg: input.data,
        aad: input.aad,
    };

    match dir {
        Direction::Seal => cipher.encrypt(nonce, payload),
        Direction::Open => cipher.decrypt(nonce, payload),
    }
    .map_err(|_| PrimitiveError::Aead)
}
