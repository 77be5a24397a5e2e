//! Oracle fulfillment proof verification.
//!
//! A fulfillment transaction must carry a native Ed25519 signature-verify
//! instruction at index 0 proving the configured oracle authority signed the
//! exact `request_id || randomness` payload being submitted. The program
//! introspects the Instructions sysvar rather than trusting the submitting
//! signer alone, so a compromised transaction relay cannot substitute a
//! different random value.

use anchor_lang::prelude::*;
use anchor_lang::solana_program::sysvar::instructions as sysvar_instructions;
use solana_sdk_ids::ed25519_program;

use crate::errors::RaffleError;

/// Length of the signed fulfillment message: request id (8 LE) + randomness (32).
pub const PROOF_MESSAGE_LEN: usize = 40;

/// Index value meaning "data embedded in this same instruction".
const SELF_REFERENCING: u16 = 0xFFFF;

/// The Ed25519SignatureOffsets table at bytes `[2..16]` of the native
/// Ed25519 instruction data (seven u16 LE fields):
///
/// ```text
/// signature_offset, signature_instruction_index,
/// public_key_offset, public_key_instruction_index,
/// message_data_offset, message_data_size, message_instruction_index
/// ```
struct ProofOffsets {
    signature_ix_index: u16,
    pubkey_offset: u16,
    pubkey_ix_index: u16,
    message_offset: u16,
    message_size: u16,
    message_ix_index: u16,
}

fn read_u16(data: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([data[at], data[at + 1]])
}

impl ProofOffsets {
    fn parse(data: &[u8]) -> Result<Self> {
        require!(data.len() >= 16, RaffleError::InvalidEd25519Instruction);
        // data[0] = num_signatures, data[1] = padding.
        require!(data[0] == 1, RaffleError::InvalidSignatureCount);

        Ok(Self {
            signature_ix_index: read_u16(data, 4),
            pubkey_offset: read_u16(data, 6),
            pubkey_ix_index: read_u16(data, 8),
            message_offset: read_u16(data, 10),
            message_size: read_u16(data, 12),
            message_ix_index: read_u16(data, 14),
        })
    }

    fn is_self_contained(&self) -> bool {
        self.signature_ix_index == SELF_REFERENCING
            && self.pubkey_ix_index == SELF_REFERENCING
            && self.message_ix_index == SELF_REFERENCING
    }
}

/// Build the message the oracle authority must have signed.
pub fn proof_message(request_id: u64, randomness: &[u8; 32]) -> [u8; PROOF_MESSAGE_LEN] {
    let mut message = [0u8; PROOF_MESSAGE_LEN];
    message[..8].copy_from_slice(&request_id.to_le_bytes());
    message[8..].copy_from_slice(randomness);
    message
}

/// Verify that instruction 0 of the current transaction is a native Ed25519
/// signature-verify binding `expected_authority` to this fulfillment.
pub fn verify_fulfillment_proof(
    instructions_sysvar: &UncheckedAccount,
    expected_authority: &Pubkey,
    request_id: u64,
    randomness: &[u8; 32],
) -> Result<()> {
    let ix =
        sysvar_instructions::load_instruction_at_checked(0, &instructions_sysvar.to_account_info())
            .map_err(|_| RaffleError::InvalidEd25519Instruction)?;

    require_keys_eq!(
        ix.program_id,
        ed25519_program::ID,
        RaffleError::InvalidEd25519Program
    );

    let offsets = ProofOffsets::parse(&ix.data)?;
    require!(
        offsets.is_self_contained(),
        RaffleError::InvalidEd25519InstructionIndex
    );

    let pubkey_start = offsets.pubkey_offset as usize;
    let pubkey_end = pubkey_start + 32;
    require!(
        ix.data.len() >= pubkey_end,
        RaffleError::InvalidEd25519Instruction
    );
    require!(
        ix.data[pubkey_start..pubkey_end] == expected_authority.to_bytes(),
        RaffleError::InvalidEd25519Pubkey
    );

    require!(
        offsets.message_size as usize == PROOF_MESSAGE_LEN,
        RaffleError::InvalidEd25519Message
    );
    let message_start = offsets.message_offset as usize;
    let message_end = message_start + PROOF_MESSAGE_LEN;
    require!(
        ix.data.len() >= message_end,
        RaffleError::InvalidEd25519Instruction
    );
    require!(
        ix.data[message_start..message_end] == proof_message(request_id, randomness),
        RaffleError::InvalidEd25519Message
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proof_message_is_request_id_then_randomness() {
        let randomness = [0xCDu8; 32];
        let message = proof_message(0x0102030405060708, &randomness);

        assert_eq!(message.len(), PROOF_MESSAGE_LEN);
        assert_eq!(message[..8], 0x0102030405060708u64.to_le_bytes());
        assert_eq!(message[8..], randomness);
    }
}
