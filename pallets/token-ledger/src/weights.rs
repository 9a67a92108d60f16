#![cfg_attr(rustfmt, rustfmt_skip)]
#![allow(unused_parens)]
#![allow(unused_imports)]
#![allow(missing_docs)]

use polkadot_sdk::frame_support::{traits::Get, weights::{Weight, constants::RocksDbWeight}};
use core::marker::PhantomData;

pub trait WeightInfo {
	fn create() -> Weight;
	fn transfer() -> Weight;
	fn transfer_from() -> Weight;
	fn approve() -> Weight;
	fn increase_approval() -> Weight;
	fn decrease_approval() -> Weight;
	fn transfer_ico() -> Weight;
	fn finalize_ico() -> Weight;
	fn freeze(n: u32) -> Weight;
	fn unfreeze() -> Weight;
	fn transfer_ownership() -> Weight;
}

pub struct SubstrateWeight<T>(PhantomData<T>);
impl<T: polkadot_sdk::frame_system::Config> WeightInfo for SubstrateWeight<T> {
	fn create() -> Weight {
		Weight::from_parts(25_000_000, 3000)
			.saturating_add(T::DbWeight::get().reads(1))
			.saturating_add(T::DbWeight::get().writes(3))
	}
	fn transfer() -> Weight {
		Weight::from_parts(30_000_000, 6000)
			.saturating_add(T::DbWeight::get().reads(4))
			.saturating_add(T::DbWeight::get().writes(2))
	}
	fn transfer_from() -> Weight {
		Weight::from_parts(35_000_000, 6000)
			.saturating_add(T::DbWeight::get().reads(5))
			.saturating_add(T::DbWeight::get().writes(3))
	}
	fn approve() -> Weight {
		Weight::from_parts(15_000_000, 3000)
			.saturating_add(T::DbWeight::get().reads(1))
			.saturating_add(T::DbWeight::get().writes(1))
	}
	fn increase_approval() -> Weight {
		Weight::from_parts(18_000_000, 3000)
			.saturating_add(T::DbWeight::get().reads(2))
			.saturating_add(T::DbWeight::get().writes(1))
	}
	fn decrease_approval() -> Weight {
		Weight::from_parts(18_000_000, 3000)
			.saturating_add(T::DbWeight::get().reads(2))
			.saturating_add(T::DbWeight::get().writes(1))
	}
	fn transfer_ico() -> Weight {
		Weight::from_parts(30_000_000, 6000)
			.saturating_add(T::DbWeight::get().reads(3))
			.saturating_add(T::DbWeight::get().writes(2))
	}
	fn finalize_ico() -> Weight {
		Weight::from_parts(15_000_000, 3000)
			.saturating_add(T::DbWeight::get().reads(1))
			.saturating_add(T::DbWeight::get().writes(1))
	}
	fn freeze(n: u32) -> Weight {
		Weight::from_parts(15_000_000, 3000)
			.saturating_add(Weight::from_parts(3_000_000, 2500).saturating_mul(n.into()))
			.saturating_add(T::DbWeight::get().reads(1))
			.saturating_add(T::DbWeight::get().writes(n as u64))
	}
	fn unfreeze() -> Weight {
		Weight::from_parts(15_000_000, 3000)
			.saturating_add(T::DbWeight::get().reads(1))
			.saturating_add(T::DbWeight::get().writes(1))
	}
	fn transfer_ownership() -> Weight {
		Weight::from_parts(15_000_000, 3000)
			.saturating_add(T::DbWeight::get().reads(1))
			.saturating_add(T::DbWeight::get().writes(1))
	}
}

impl WeightInfo for () {
	fn create() -> Weight {
		Weight::from_parts(25_000_000, 3000)
	}
	fn transfer() -> Weight {
		Weight::from_parts(30_000_000, 6000)
	}
	fn transfer_from() -> Weight {
		Weight::from_parts(35_000_000, 6000)
	}
	fn approve() -> Weight {
		Weight::from_parts(15_000_000, 3000)
	}
	fn increase_approval() -> Weight {
		Weight::from_parts(18_000_000, 3000)
	}
	fn decrease_approval() -> Weight {
		Weight::from_parts(18_000_000, 3000)
	}
	fn transfer_ico() -> Weight {
		Weight::from_parts(30_000_000, 6000)
	}
	fn finalize_ico() -> Weight {
		Weight::from_parts(15_000_000, 3000)
	}
	fn freeze(n: u32) -> Weight {
		Weight::from_parts(15_000_000, 3000)
			.saturating_add(Weight::from_parts(3_000_000, 2500).saturating_mul(n.into()))
	}
	fn unfreeze() -> Weight {
		Weight::from_parts(15_000_000, 3000)
	}
	fn transfer_ownership() -> Weight {
		Weight::from_parts(15_000_000, 3000)
	}
}
