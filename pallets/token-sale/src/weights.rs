#![cfg_attr(rustfmt, rustfmt_skip)]
#![allow(unused_parens)]
#![allow(unused_imports)]
#![allow(missing_docs)]

use polkadot_sdk::frame_support::{traits::Get, weights::{Weight, constants::RocksDbWeight}};
use core::marker::PhantomData;

pub trait WeightInfo {
	fn create_sale() -> Weight;
	fn start() -> Weight;
	fn set_presale_dates() -> Weight;
	fn set_ico_dates() -> Weight;
	fn set_manager() -> Weight;
	fn set_rate() -> Weight;
	fn transfer_ico() -> Weight;
	fn pay() -> Weight;
	fn finalize() -> Weight;
	fn withdraw_proceeds() -> Weight;
}

pub struct SubstrateWeight<T>(PhantomData<T>);
impl<T: polkadot_sdk::frame_system::Config> WeightInfo for SubstrateWeight<T> {
	fn create_sale() -> Weight {
		Weight::from_parts(20_000_000, 3000)
			.saturating_add(T::DbWeight::get().reads(1))
			.saturating_add(T::DbWeight::get().writes(2))
	}
	fn start() -> Weight {
		Weight::from_parts(25_000_000, 3500)
			.saturating_add(T::DbWeight::get().reads(2))
			.saturating_add(T::DbWeight::get().writes(1))
	}
	fn set_presale_dates() -> Weight {
		Weight::from_parts(15_000_000, 3500)
			.saturating_add(T::DbWeight::get().reads(1))
			.saturating_add(T::DbWeight::get().writes(1))
	}
	fn set_ico_dates() -> Weight {
		Weight::from_parts(15_000_000, 3500)
			.saturating_add(T::DbWeight::get().reads(1))
			.saturating_add(T::DbWeight::get().writes(1))
	}
	fn set_manager() -> Weight {
		Weight::from_parts(15_000_000, 3500)
			.saturating_add(T::DbWeight::get().reads(1))
			.saturating_add(T::DbWeight::get().writes(1))
	}
	fn set_rate() -> Weight {
		Weight::from_parts(15_000_000, 3500)
			.saturating_add(T::DbWeight::get().reads(1))
			.saturating_add(T::DbWeight::get().writes(1))
	}
	fn transfer_ico() -> Weight {
		Weight::from_parts(45_000_000, 6000)
			.saturating_add(T::DbWeight::get().reads(4))
			.saturating_add(T::DbWeight::get().writes(3))
	}
	fn pay() -> Weight {
		Weight::from_parts(90_000_000, 8000)
			.saturating_add(T::DbWeight::get().reads(6))
			.saturating_add(T::DbWeight::get().writes(6))
	}
	fn finalize() -> Weight {
		Weight::from_parts(40_000_000, 4000)
			.saturating_add(T::DbWeight::get().reads(3))
			.saturating_add(T::DbWeight::get().writes(2))
	}
	fn withdraw_proceeds() -> Weight {
		Weight::from_parts(40_000_000, 4000)
			.saturating_add(T::DbWeight::get().reads(3))
			.saturating_add(T::DbWeight::get().writes(2))
	}
}

impl WeightInfo for () {
	fn create_sale() -> Weight {
		Weight::from_parts(20_000_000, 3000)
	}
	fn start() -> Weight {
		Weight::from_parts(25_000_000, 3500)
	}
	fn set_presale_dates() -> Weight {
		Weight::from_parts(15_000_000, 3500)
	}
	fn set_ico_dates() -> Weight {
		Weight::from_parts(15_000_000, 3500)
	}
	fn set_manager() -> Weight {
		Weight::from_parts(15_000_000, 3500)
	}
	fn set_rate() -> Weight {
		Weight::from_parts(15_000_000, 3500)
	}
	fn transfer_ico() -> Weight {
		Weight::from_parts(45_000_000, 6000)
	}
	fn pay() -> Weight {
		Weight::from_parts(90_000_000, 8000)
	}
	fn finalize() -> Weight {
		Weight::from_parts(40_000_000, 4000)
	}
	fn withdraw_proceeds() -> Weight {
		Weight::from_parts(40_000_000, 4000)
	}
}
