use crate::hash::Hash;
use std::fmt;

/// A single transfer request from `payer` to `receiver`.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transaction {
    /// Caller-chosen id, unique across the whole ledger
    pub id: String,
    /// Value moved from payer to receiver
    pub amount: i64,
    /// Charged to the payer on top of `amount`, credited to nobody
    pub fee: i64,
    /// Free-form memo
    pub note: String,
    /// Address of the debited account
    pub payer: String,
    /// Address of the credited account
    pub receiver: String,
}

impl Transaction {
    /// Create a new transaction
    pub fn new(
        id: impl Into<String>,
        amount: i64,
        fee: i64,
        note: impl Into<String>,
        payer: impl Into<String>,
        receiver: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            amount,
            fee,
            note: note.into(),
            payer: payer.into(),
            receiver: receiver.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Total debited from the payer.
    pub fn total_cost(&self) -> i64 {
        self.amount.saturating_add(self.fee)
    }

    /// Deterministic content hash, used as the Merkle leaf.
    ///
    /// Strings are length-prefixed so that field boundaries cannot be shifted
    /// to produce a colliding encoding.
    pub fn hash(&self) -> Hash {
        let mut data = Vec::with_capacity(64 + self.note.len());
        push_str(&mut data, &self.id);
        data.extend_from_slice(&self.amount.to_le_bytes());
        data.extend_from_slice(&self.fee.to_le_bytes());
        push_str(&mut data, &self.note);
        push_str(&mut data, &self.payer);
        push_str(&mut data, &self.receiver);
        Hash::compute(&data)
    }
}

fn push_str(buf: &mut Vec<u8>, s: &str) {
    buf.extend_from_slice(&(s.len() as u64).to_le_bytes());
    buf.extend_from_slice(s.as_bytes());
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Transaction {{ id: {}, amount: {}, fee: {}, note: {:?}, payer: {}, receiver: {} }}",
            self.id, self.amount, self.fee, self.note, self.payer, self.receiver
        )
    }
}
