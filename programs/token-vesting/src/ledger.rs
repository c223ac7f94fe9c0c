//! Off-chain vesting ledger.
//!
//! Records are kept in maps keyed by their derived address, and every create
//! is insert-if-absent, the same uniqueness rule the runtime applies to `init`
//! accounts. Claims read the time from the injected `TimeSource` and are
//! staged on copies, committed only when the engine succeeds.

use std::cell::Cell;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::rc::Rc;

use anchor_lang::prelude::Pubkey;

use crate::custody::InMemoryCustody;
use crate::engine::{self, ClaimQuote};
use crate::error::VestingError;
use crate::guard::{self, ClaimRequest};
use crate::state::{EmployeeAccount, VestingAccount};
use crate::utils::{pda, vesting_math};

pub trait TimeSource {
    fn unix_timestamp(&self) -> i64;
}

/// Clock that only moves when told to. Clones share the same time.
#[derive(Clone, Debug, Default)]
pub struct ManualClock(Rc<Cell<i64>>);

impl ManualClock {
    pub fn at(ts: i64) -> Self {
        Self(Rc::new(Cell::new(ts)))
    }

    pub fn set(&self, ts: i64) {
        self.0.set(ts);
    }

    pub fn advance(&self, secs: i64) {
        self.0.set(self.0.get().saturating_add(secs));
    }
}

impl TimeSource for ManualClock {
    fn unix_timestamp(&self) -> i64 {
        self.0.get()
    }
}

/// Addresses allocated by `create_program`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProgramAddresses {
    pub vesting_account: Pubkey,
    pub treasury: Pubkey,
}

pub struct Ledger<T: TimeSource> {
    program_id: Pubkey,
    clock: T,
    programs: BTreeMap<Pubkey, VestingAccount>,
    schedules: BTreeMap<Pubkey, EmployeeAccount>,
    custody: InMemoryCustody,
}

impl<T: TimeSource> Ledger<T> {
    pub fn new(program_id: Pubkey, clock: T) -> Self {
        Self {
            program_id,
            clock,
            programs: BTreeMap::new(),
            schedules: BTreeMap::new(),
            custody: InMemoryCustody::new(),
        }
    }

    pub fn custody(&self) -> &InMemoryCustody {
        &self.custody
    }

    /// External token movements (deposits) go through here.
    pub fn custody_mut(&mut self) -> &mut InMemoryCustody {
        &mut self.custody
    }

    pub fn create_program(
        &mut self,
        creator: Pubkey,
        name: &str,
        mint: Pubkey,
    ) -> Result<ProgramAddresses, VestingError> {
        VestingAccount::validate_name(name)?;
        if mint == Pubkey::default() {
            return Err(VestingError::InvalidAsset);
        }

        let (vesting_account, bump) = pda::program_address(name, &self.program_id);
        let (treasury, treasury_bump) = pda::treasury_address(name, &self.program_id);
        if self.programs.contains_key(&vesting_account) || self.custody.account(&treasury).is_some() {
            return Err(VestingError::DuplicateRecord);
        }

        self.custody.open(treasury, vesting_account, mint)?;
        self.programs.insert(
            vesting_account,
            VestingAccount {
                owner: creator,
                mint,
                treasury,
                name: name.to_string(),
                bump,
                treasury_bump,
            },
        );
        Ok(ProgramAddresses {
            vesting_account,
            treasury,
        })
    }

    pub fn lookup_program(&self, name: &str) -> Result<&VestingAccount, VestingError> {
        let (vesting_account, _) = pda::program_address(name, &self.program_id);
        self.programs
            .get(&vesting_account)
            .ok_or(VestingError::RecordNotFound)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn create_schedule(
        &mut self,
        caller: Pubkey,
        vesting_account: &Pubkey,
        beneficiary: Pubkey,
        start_time: i64,
        end_time: i64,
        total_amount: i64,
        cliff_time: i64,
    ) -> Result<Pubkey, VestingError> {
        let program = self
            .programs
            .get(vesting_account)
            .ok_or(VestingError::RecordNotFound)?;
        guard::require_owner(&caller, program)?;
        if beneficiary == Pubkey::default() {
            return Err(VestingError::InvalidBeneficiary);
        }
        vesting_math::validate_schedule(start_time, cliff_time, end_time, total_amount)?;

        let (employee_account, bump) =
            pda::schedule_address(&beneficiary, vesting_account, &self.program_id);
        match self.schedules.entry(employee_account) {
            Entry::Occupied(_) => Err(VestingError::DuplicateRecord),
            Entry::Vacant(slot) => {
                slot.insert(EmployeeAccount {
                    beneficiary,
                    start_time,
                    cliff_time,
                    end_time,
                    total_amount,
                    total_withdrawn: 0,
                    vesting_account: *vesting_account,
                    bump,
                });
                Ok(employee_account)
            }
        }
    }

    pub fn schedule(&self, employee_account: &Pubkey) -> Option<&EmployeeAccount> {
        self.schedules.get(employee_account)
    }

    pub fn lookup_schedule(
        &self,
        beneficiary: &Pubkey,
        program_name: &str,
    ) -> Result<&EmployeeAccount, VestingError> {
        let (vesting_account, _) = pda::program_address(program_name, &self.program_id);
        let (employee_account, _) =
            pda::schedule_address(beneficiary, &vesting_account, &self.program_id);
        self.schedules
            .get(&employee_account)
            .ok_or(VestingError::RecordNotFound)
    }

    pub fn quote(&self, employee_account: &Pubkey) -> Result<ClaimQuote, VestingError> {
        let schedule = self
            .schedules
            .get(employee_account)
            .ok_or(VestingError::RecordNotFound)?;
        engine::quote(schedule, self.clock.unix_timestamp())
    }

    /// Claim on behalf of `caller` against the schedule at `employee_account`.
    pub fn claim(
        &mut self,
        caller: Pubkey,
        program_name: &str,
        employee_account: Pubkey,
    ) -> Result<u64, VestingError> {
        let now = self.clock.unix_timestamp();
        let (vesting_account, _) = pda::program_address(program_name, &self.program_id);
        let program = self
            .programs
            .get(&vesting_account)
            .ok_or(VestingError::RecordNotFound)?;
        let mut schedule = self
            .schedules
            .get(&employee_account)
            .ok_or(VestingError::RecordNotFound)?
            .clone();

        let req = ClaimRequest {
            caller,
            program_name,
            vesting_account,
            employee_account,
            treasury: program.treasury,
            mint: program.mint,
            destination: pda::associated_holding(&caller, &program.mint),
        };
        let mut custody = self.custody.clone();
        let released = engine::claim(
            &self.program_id,
            &req,
            &mut schedule,
            program,
            now,
            &mut custody,
        )?;

        self.schedules.insert(employee_account, schedule);
        self.custody = custody;
        Ok(released)
    }
}
