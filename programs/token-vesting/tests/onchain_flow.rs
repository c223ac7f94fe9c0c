//! Instruction-level tests: the Anchor handlers run inside a local bank with
//! the real SPL Token and associated-token programs.

use anchor_lang::prelude::{AccountInfo, Pubkey};
use anchor_lang::solana_program::entrypoint::ProgramResult;
use anchor_lang::solana_program::program_pack::Pack;
use anchor_lang::{system_program, AccountDeserialize, InstructionData, ToAccountMetas};
use anchor_spl::token::{spl_token, TokenAccount};
use solana_program_test::{processor, BanksClientError, ProgramTest, ProgramTestContext};
use solana_sdk::account::Account;
use solana_sdk::clock::Clock;
use solana_sdk::instruction::{Instruction, InstructionError};
use solana_sdk::rent::Rent;
use solana_sdk::signature::{Keypair, Signer};
use solana_sdk::transaction::{Transaction, TransactionError};

use token_vesting::error::VestingError;
use token_vesting::state::EmployeeAccount;
use token_vesting::utils::pda;

const YEAR: i64 = 31_536_000;
const NAME: &str = "Acme Corp";
const SOL: u64 = 1_000_000_000;

// Anchor's entry ties the slice lifetime to the account lifetime.
fn process_instruction<'a, 'b, 'c>(
    program_id: &'a Pubkey,
    accounts: &'b [AccountInfo<'c>],
    data: &[u8],
) -> ProgramResult {
    let accounts: &'c [AccountInfo<'c>] = Box::leak(accounts.to_vec().into_boxed_slice());
    token_vesting::entry(program_id, accounts, data)
}

fn mint_account(authority: &Pubkey) -> Account {
    let mut data = vec![0u8; spl_token::state::Mint::LEN];
    spl_token::state::Mint::pack(
        spl_token::state::Mint {
            mint_authority: Some(*authority).into(),
            supply: 0,
            decimals: 6,
            is_initialized: true,
            freeze_authority: None.into(),
        },
        &mut data,
    )
    .unwrap();
    Account {
        lamports: Rent::default().minimum_balance(data.len()),
        data,
        owner: spl_token::ID,
        executable: false,
        rent_epoch: 0,
    }
}

fn error_code<T: std::fmt::Debug>(result: Result<T, BanksClientError>) -> u32 {
    match result.expect_err("transaction should fail").unwrap() {
        TransactionError::InstructionError(_, InstructionError::Custom(code)) => code,
        other => panic!("unexpected failure: {other:?}"),
    }
}

fn code(err: VestingError) -> u32 {
    u32::from(err)
}

struct Chain {
    ctx: ProgramTestContext,
    mint: Pubkey,
    mint_authority: Keypair,
}

impl Chain {
    async fn start(wallets: &[Pubkey]) -> Self {
        let mut test = ProgramTest::new(
            "token_vesting",
            token_vesting::ID,
            processor!(process_instruction),
        );
        let mint_authority = Keypair::new();
        let mint = Pubkey::new_unique();
        test.add_account(mint, mint_account(&mint_authority.pubkey()));
        for wallet in wallets {
            test.add_account(*wallet, Account::new(10 * SOL, 0, &system_program::ID));
        }
        Chain {
            ctx: test.start_with_context().await,
            mint,
            mint_authority,
        }
    }

    fn owner(&self) -> Pubkey {
        self.ctx.payer.pubkey()
    }

    /// Fresh blockhash per send, so a retried instruction is a new transaction.
    async fn send(&mut self, ix: Instruction, signers: &[&Keypair]) -> Result<(), BanksClientError> {
        let blockhash = self.ctx.get_new_latest_blockhash().await.unwrap();
        let mut all: Vec<&Keypair> = vec![&self.ctx.payer];
        all.extend_from_slice(signers);
        let tx = Transaction::new_signed_with_payer(&[ix], Some(&self.ctx.payer.pubkey()), &all, blockhash);
        self.ctx.banks_client.process_transaction(tx).await
    }

    async fn create_program(&mut self, name: &str, mint: Pubkey) -> Result<(), BanksClientError> {
        let (vesting_account, _) = pda::program_address(name, &token_vesting::ID);
        let (treasury, _) = pda::treasury_address(name, &token_vesting::ID);
        let ix = Instruction {
            program_id: token_vesting::ID,
            accounts: token_vesting::accounts::CreateVestingAccount {
                owner: self.owner(),
                vesting_account,
                mint,
                treasury_token_account: treasury,
                token_program: spl_token::ID,
                system_program: system_program::ID,
            }
            .to_account_metas(None),
            data: token_vesting::instruction::CreateVestingAccount {
                name: name.to_string(),
            }
            .data(),
        };
        self.send(ix, &[]).await
    }

    async fn deposit(&mut self, name: &str, amount: u64) {
        let (treasury, _) = pda::treasury_address(name, &token_vesting::ID);
        let ix = spl_token::instruction::mint_to(
            &spl_token::ID,
            &self.mint,
            &treasury,
            &self.mint_authority.pubkey(),
            &[],
            amount,
        )
        .unwrap();
        let authority = self.mint_authority.insecure_clone();
        self.send(ix, &[&authority]).await.unwrap();
    }

    /// start 0, cliff 1y, end 4y.
    async fn create_schedule(
        &mut self,
        owner: Option<&Keypair>,
        beneficiary: Pubkey,
        total_amount: i64,
    ) -> Result<Pubkey, BanksClientError> {
        let (vesting_account, _) = pda::program_address(NAME, &token_vesting::ID);
        let (employee_account, _) =
            pda::schedule_address(&beneficiary, &vesting_account, &token_vesting::ID);
        let owner_key = owner.map_or(self.owner(), |k| k.pubkey());
        let ix = Instruction {
            program_id: token_vesting::ID,
            accounts: token_vesting::accounts::CreateEmployeeSchedule {
                owner: owner_key,
                beneficiary,
                vesting_account,
                employee_account,
                system_program: system_program::ID,
            }
            .to_account_metas(None),
            data: token_vesting::instruction::CreateEmployeeSchedule {
                start_time: 0,
                end_time: 4 * YEAR,
                total_amount,
                cliff_time: YEAR,
            }
            .data(),
        };
        let signers: Vec<&Keypair> = owner.into_iter().collect();
        self.send(ix, &signers).await?;
        Ok(employee_account)
    }

    async fn claim(&mut self, caller: &Keypair, employee_account: Pubkey) -> Result<(), BanksClientError> {
        let (vesting_account, _) = pda::program_address(NAME, &token_vesting::ID);
        let (treasury, _) = pda::treasury_address(NAME, &token_vesting::ID);
        let ix = Instruction {
            program_id: token_vesting::ID,
            accounts: token_vesting::accounts::ClaimTokens {
                beneficiary: caller.pubkey(),
                employee_account,
                vesting_account,
                mint: self.mint,
                treasury_token_account: treasury,
                beneficiary_token_account: pda::associated_holding(&caller.pubkey(), &self.mint),
                token_program: spl_token::ID,
                associated_token_program: anchor_spl::associated_token::ID,
                system_program: system_program::ID,
            }
            .to_account_metas(None),
            data: token_vesting::instruction::ClaimTokens {
                name: NAME.to_string(),
            }
            .data(),
        };
        self.send(ix, &[caller]).await
    }

    async fn warp_to(&mut self, unix_timestamp: i64) {
        let mut clock: Clock = self.ctx.banks_client.get_sysvar().await.unwrap();
        clock.unix_timestamp = unix_timestamp;
        self.ctx.set_sysvar(&clock);
    }

    async fn schedule(&mut self, address: Pubkey) -> EmployeeAccount {
        let account = self.ctx.banks_client.get_account(address).await.unwrap().unwrap();
        EmployeeAccount::try_deserialize(&mut account.data.as_slice()).unwrap()
    }

    async fn token_balance(&mut self, address: Pubkey) -> u64 {
        match self.ctx.banks_client.get_account(address).await.unwrap() {
            Some(account) => TokenAccount::try_deserialize(&mut account.data.as_slice())
                .unwrap()
                .amount,
            None => 0,
        }
    }
}

#[tokio::test]
async fn create_schedule_then_claim_through_four_years() {
    let alice = Keypair::new();
    let mut chain = Chain::start(&[alice.pubkey()]).await;
    let mint = chain.mint;
    chain.create_program(NAME, mint).await.unwrap();
    chain.deposit(NAME, 48_000).await;
    let schedule = chain.create_schedule(None, alice.pubkey(), 48_000).await.unwrap();
    let holding = pda::associated_holding(&alice.pubkey(), &mint);

    chain.warp_to(15_768_000).await;
    assert_eq!(
        error_code(chain.claim(&alice, schedule).await),
        code(VestingError::ClaimNotAvailableYet)
    );

    chain.warp_to(47_304_000).await;
    chain.claim(&alice, schedule).await.unwrap();
    assert_eq!(chain.token_balance(holding).await, 18_000);
    assert_eq!(chain.schedule(schedule).await.total_withdrawn, 18_000);

    chain.warp_to(4 * YEAR).await;
    chain.claim(&alice, schedule).await.unwrap();
    assert_eq!(chain.token_balance(holding).await, 48_000);

    assert_eq!(
        error_code(chain.claim(&alice, schedule).await),
        code(VestingError::NothingToClaim)
    );
    assert_eq!(chain.schedule(schedule).await.total_withdrawn, 48_000);
}

#[tokio::test]
async fn stranger_cannot_claim_a_beneficiarys_schedule() {
    let alice = Keypair::new();
    let mallory = Keypair::new();
    let mut chain = Chain::start(&[alice.pubkey(), mallory.pubkey()]).await;
    let mint = chain.mint;
    chain.create_program(NAME, mint).await.unwrap();
    chain.deposit(NAME, 48_000).await;
    let schedule = chain.create_schedule(None, alice.pubkey(), 48_000).await.unwrap();

    chain.warp_to(4 * YEAR).await;
    assert_eq!(
        error_code(chain.claim(&mallory, schedule).await),
        code(VestingError::Unauthorized)
    );
    assert_eq!(chain.schedule(schedule).await.total_withdrawn, 0);
    let (treasury, _) = pda::treasury_address(NAME, &token_vesting::ID);
    assert_eq!(chain.token_balance(treasury).await, 48_000);
}

#[tokio::test]
async fn second_schedule_for_same_beneficiary_is_a_duplicate() {
    let alice = Keypair::new();
    let mallory = Keypair::new();
    let mut chain = Chain::start(&[alice.pubkey(), mallory.pubkey()]).await;
    let mint = chain.mint;
    chain.create_program(NAME, mint).await.unwrap();
    let schedule = chain.create_schedule(None, alice.pubkey(), 48_000).await.unwrap();

    assert_eq!(
        error_code(chain.create_schedule(None, alice.pubkey(), 1_000).await),
        code(VestingError::DuplicateRecord)
    );
    assert_eq!(chain.schedule(schedule).await.total_amount, 48_000);

    assert_eq!(
        error_code(chain.create_schedule(Some(&mallory), mallory.pubkey(), 1_000).await),
        code(VestingError::Unauthorized)
    );
}

#[tokio::test]
async fn program_creation_rejects_taken_names_bad_mints_and_long_names() {
    let wallet = Pubkey::new_unique();
    let mut chain = Chain::start(&[wallet]).await;
    let mint = chain.mint;
    chain.create_program(NAME, mint).await.unwrap();

    assert_eq!(
        error_code(chain.create_program(NAME, mint).await),
        code(VestingError::DuplicateRecord)
    );
    assert_eq!(
        error_code(chain.create_program("Other Corp", wallet).await),
        code(VestingError::InvalidAsset)
    );
    assert_eq!(
        error_code(chain.create_program(&"n".repeat(65), mint).await),
        code(VestingError::NameTooLong)
    );

    // Nothing was left behind by the failed attempts.
    let (other, _) = pda::program_address("Other Corp", &token_vesting::ID);
    assert!(chain.ctx.banks_client.get_account(other).await.unwrap().is_none());
}
