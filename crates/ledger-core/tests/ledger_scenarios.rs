//! End-to-end ledger scenarios driven through the public API.

use ledger_core::{Action, LedgerContext, Reason};
use ledger_types::constants::{BLOCK_CAPACITY, MASTER_ADDRESS, MASTER_INITIAL_BALANCE};
use ledger_types::{Hash, Transaction};

fn context_with_ledger() -> LedgerContext {
    let mut context = LedgerContext::new();
    let ledger = context.get_instance("test", "test ledger 2025", "chapman");
    ledger.reset();
    context
}

#[test]
fn test_fund_mary_scenario() {
    let mut context = context_with_ledger();
    let ledger = context.get_instance("ignored", "ignored", "ignored");
    ledger.create_account("mary").unwrap();
    ledger.create_account("bob").unwrap();

    let id = ledger
        .process_transaction(Transaction::new("1", 1000, 10, "fund account", MASTER_ADDRESS, "mary"))
        .unwrap();
    assert_eq!(id, "1");

    // 1 of 10: nothing committed yet
    let err = ledger.get_account_balance("mary").unwrap_err();
    assert_eq!(err.action(), Action::GetAccountBalance);
    assert_eq!(
        err.reason(),
        &Reason::AccountDoesNotExist {
            address: "mary".into()
        }
    );
    assert!(ledger.validate().is_err());

    for i in 2..=BLOCK_CAPACITY {
        let tx = Transaction::new(i.to_string(), 25, 10, "", "mary", "bob");
        ledger.process_transaction(tx).unwrap();
    }

    let transfers = (BLOCK_CAPACITY - 1) as i64;
    assert_eq!(ledger.get_number_of_blocks(), 1);
    assert_eq!(
        ledger.get_account_balance("mary").unwrap(),
        1000 - transfers * (25 + 10)
    );
    assert_eq!(ledger.get_account_balance("bob").unwrap(), transfers * 25);
    assert_eq!(
        ledger.get_account_balance(MASTER_ADDRESS).unwrap(),
        MASTER_INITIAL_BALANCE - 1010
    );
    assert_eq!(ledger.validate(), Ok(()));
}

#[test]
fn test_get_instance_keeps_first_metadata() {
    let mut context = LedgerContext::new();
    context.get_instance("first", "first description", "first seed");
    let again = context.get_instance("second", "second description", "second seed");

    assert_eq!(again.name(), "first");
    assert_eq!(again.description(), "first description");
    assert_eq!(again.seed(), "first seed");
}

#[test]
fn test_only_every_tenth_transaction_commits() {
    let mut context = context_with_ledger();
    let ledger = context.ledger_mut().unwrap();
    ledger.create_account("mary").unwrap();

    for i in 1..=BLOCK_CAPACITY * 4 {
        let before = ledger.get_number_of_blocks();
        let tx = Transaction::new(format!("t{}", i), 1, 10, "", MASTER_ADDRESS, "mary");
        ledger.process_transaction(tx).unwrap();

        let expected = if i % BLOCK_CAPACITY == 0 { before + 1 } else { before };
        assert_eq!(ledger.get_number_of_blocks(), expected);
        assert_eq!(
            ledger.get_uncommitted_block().tx_count(),
            i % BLOCK_CAPACITY
        );
    }

    for n in 1..=4i64 {
        let block = ledger.get_block(n).unwrap();
        assert_eq!(block.number(), n as u64);
        assert_eq!(block.tx_count(), BLOCK_CAPACITY);
        if n > 1 {
            let previous = ledger.get_block(n - 1).unwrap();
            assert_eq!(block.previous_hash(), previous.hash());
        }
    }
}

#[test]
fn test_rejections_do_not_count_toward_commit() {
    let mut context = context_with_ledger();
    let ledger = context.ledger_mut().unwrap();
    ledger.create_account("mary").unwrap();

    for i in 0..BLOCK_CAPACITY - 1 {
        let tx = Transaction::new(i.to_string(), 1, 10, "", MASTER_ADDRESS, "mary");
        ledger.process_transaction(tx).unwrap();
    }

    let rejected = [
        Transaction::new("a", -1, 10, "", MASTER_ADDRESS, "mary"),
        Transaction::new("b", 1, 9, "", MASTER_ADDRESS, "mary"),
        Transaction::new("c", 1, 10, "x".repeat(1025), MASTER_ADDRESS, "mary"),
        Transaction::new("0", 1, 10, "", MASTER_ADDRESS, "mary"),
        Transaction::new("d", 1, 10, "", "mary", MASTER_ADDRESS),
    ];
    let expected_reasons = [
        Reason::AmountOutOfRange { amount: -1 },
        Reason::FeeTooLow { fee: 9, minimum: 10 },
        Reason::NoteTooLong {
            length: 1025,
            max: 1024,
        },
        Reason::DuplicateTransactionId { id: "0".into() },
        Reason::InsufficientFunds { have: 9, need: 11 },
    ];

    for (tx, reason) in rejected.into_iter().zip(expected_reasons) {
        let err = ledger.process_transaction(tx).unwrap_err();
        assert_eq!(err.action(), Action::ProcessTransaction);
        assert_eq!(err.reason(), &reason);
        assert_eq!(ledger.get_number_of_blocks(), 0);
    }

    let tx = Transaction::new("last", 1, 10, "", MASTER_ADDRESS, "mary");
    ledger.process_transaction(tx).unwrap();
    assert_eq!(ledger.get_number_of_blocks(), 1);
}

#[test]
fn test_each_tamper_reports_its_own_reason() {
    let mut context = context_with_ledger();
    let ledger = context.ledger_mut().unwrap();
    ledger.create_account("mary").unwrap();
    for i in 0..BLOCK_CAPACITY * 3 {
        let tx = Transaction::new(i.to_string(), 3, 10, "", MASTER_ADDRESS, "mary");
        ledger.process_transaction(tx).unwrap();
    }
    assert_eq!(ledger.validate(), Ok(()));

    let pristine = ledger.get_block(3).unwrap().clone();

    ledger
        .get_block_mut(3)
        .unwrap()
        .set_previous_hash(Hash::compute(b"forged"));
    assert_eq!(
        ledger.validate().unwrap_err().reason(),
        &Reason::HashInconsistent { block: 3 }
    );
    *ledger.get_block_mut(3).unwrap() = pristine.clone();

    let extra = Transaction::new("extra", 1, 10, "", MASTER_ADDRESS, "mary");
    ledger.get_block_mut(3).unwrap().transactions_mut().push(extra);
    assert_eq!(
        ledger.validate().unwrap_err().reason(),
        &Reason::TransactionCountMismatch {
            block: 3,
            count: BLOCK_CAPACITY + 1,
            expected: BLOCK_CAPACITY
        }
    );
    *ledger.get_block_mut(3).unwrap() = pristine.clone();

    ledger
        .get_block_mut(3)
        .unwrap()
        .account_balance_map_mut()
        .insert(MASTER_ADDRESS.into(), MASTER_INITIAL_BALANCE);
    let err = ledger.validate().unwrap_err();
    assert_eq!(err.action(), Action::Validate);
    assert!(matches!(err.reason(), Reason::BalanceMismatch { .. }));
    *ledger.get_block_mut(3).unwrap() = pristine;

    assert_eq!(ledger.validate(), Ok(()));
}

#[test]
fn test_transaction_lookup_covers_all_blocks() {
    let mut context = context_with_ledger();
    let ledger = context.ledger_mut().unwrap();
    ledger.create_account("mary").unwrap();
    for i in 0..BLOCK_CAPACITY * 2 + 5 {
        let tx = Transaction::new(format!("id-{}", i), i as i64, 10, format!("n{}", i), MASTER_ADDRESS, "mary");
        ledger.process_transaction(tx).unwrap();
    }

    for i in 0..BLOCK_CAPACITY * 2 + 5 {
        let tx = ledger.get_transaction(&format!("id-{}", i)).unwrap();
        assert_eq!(tx.amount, i as i64);
        assert_eq!(tx.note, format!("n{}", i));
    }
    assert!(ledger.get_transaction("").is_none());
    assert!(ledger.get_transaction("id-999").is_none());
}

#[test]
fn test_open_block_resolves_master() {
    let mut context = context_with_ledger();
    let ledger = context.ledger_mut().unwrap();

    let master = ledger
        .get_uncommitted_block()
        .get_account(MASTER_ADDRESS)
        .unwrap();
    assert_eq!(master.balance(), MASTER_INITIAL_BALANCE);

    ledger.create_account("mary").unwrap();
    assert_eq!(
        ledger
            .get_uncommitted_block()
            .get_account("mary")
            .map(|account| account.balance()),
        Some(0)
    );

    // Nothing committed: snapshot queries still fail
    assert!(ledger.get_account_balance(MASTER_ADDRESS).is_err());
    assert!(ledger.validate().is_err());
}
