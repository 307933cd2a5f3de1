use dex_types::DexError;
use soroban_sdk::{token, Address, Env};

fn to_token_amount(amount: u128) -> Result<i128, DexError> {
    i128::try_from(amount).map_err(|_| DexError::MathOverflow)
}

/// Pull `amount` of `token` from `payer` into the pool manager.
///
/// The receipt is measured on the manager's own balance, so a token that
/// delivers less than it was asked to (transfer fees, rebasing) fails with
/// `InsufficientPayment` and the whole invocation is rolled back.
pub fn collect_payment(
    env: &Env,
    token: &Address,
    payer: &Address,
    amount: u128,
) -> Result<(), DexError> {
    if amount == 0 {
        return Ok(());
    }
    let amount = to_token_amount(amount)?;

    let client = token::Client::new(env, token);
    let this = env.current_contract_address();

    let balance_before = client.balance(&this);
    client.transfer(payer, &this, &amount);
    let balance_after = client.balance(&this);

    let received = balance_after
        .checked_sub(balance_before)
        .ok_or(DexError::InsufficientPayment)?;
    if received < amount {
        return Err(DexError::InsufficientPayment);
    }
    Ok(())
}

/// Push `amount` of `token` from the pool manager to `recipient`
pub fn pay(env: &Env, token: &Address, recipient: &Address, amount: u128) -> Result<(), DexError> {
    if amount == 0 {
        return Ok(());
    }
    let amount = to_token_amount(amount)?;

    token::Client::new(env, token).transfer(&env.current_contract_address(), recipient, &amount);
    Ok(())
}
