//! Western and Chinese astrology expressed as one interface so a single
//! coordinator drives both.

use crate::domain::model::{
    AstrologyMode, ChineseZodiacInfo, ChineseZodiacSign, CompatibilityInfo, Horoscope, Timeframe,
    ZodiacInfo, ZodiacSign,
};
use crate::domain::ports::{BoxFuture, ContentProvider};
use crate::utils::error::{CompassError, Result};
use serde::Serialize;
use std::fmt::{Debug, Display};
use std::str::FromStr;

pub trait AstrologySystem: Send + Sync + 'static {
    type Sign: Copy
        + Eq
        + Debug
        + Display
        + FromStr<Err = CompassError>
        + Send
        + Sync
        + 'static;
    type Info: Clone + Debug + PartialEq + Serialize + Send + Sync + 'static;

    const MODE: AstrologyMode;
    /// Store key holding the selected sign.
    const SIGN_KEY: &'static str;
    /// Store key holding the timeframe.
    const TIMEFRAME_KEY: &'static str;
    /// Shown when sign info or horoscope cannot be fetched on selection.
    const CONTENT_FAILURE: &'static str;
    const HOROSCOPE_FAILURE: &'static str;
    const COMPATIBILITY_FAILURE: &'static str;

    fn signs() -> &'static [Self::Sign];
    fn symbol(sign: Self::Sign) -> &'static str;
    /// Extra label under the sign on the wheel, if any.
    fn caption(sign: Self::Sign) -> Option<&'static str>;

    fn sign_info(provider: &dyn ContentProvider, sign: Self::Sign) -> BoxFuture<'_, Result<Self::Info>>;
    fn horoscope(
        provider: &dyn ContentProvider,
        sign: Self::Sign,
        timeframe: Timeframe,
    ) -> BoxFuture<'_, Result<Horoscope>>;
    fn compatibility(
        provider: &dyn ContentProvider,
        first: Self::Sign,
        second: Self::Sign,
    ) -> BoxFuture<'_, Result<CompatibilityInfo>>;
}

#[derive(Debug, Clone, Copy)]
pub struct Western;

#[derive(Debug, Clone, Copy)]
pub struct Chinese;

impl AstrologySystem for Western {
    type Sign = ZodiacSign;
    type Info = ZodiacInfo;

    const MODE: AstrologyMode = AstrologyMode::Western;
    const SIGN_KEY: &'static str = "selectedSign";
    const TIMEFRAME_KEY: &'static str = "timeframe";
    const CONTENT_FAILURE: &'static str = "Failed to fetch zodiac data. Please try again.";
    const HOROSCOPE_FAILURE: &'static str = "Failed to fetch horoscope. Please try again.";
    const COMPATIBILITY_FAILURE: &'static str = "Failed to check compatibility. Please try again.";

    fn signs() -> &'static [ZodiacSign] {
        &ZodiacSign::ALL
    }

    fn symbol(sign: ZodiacSign) -> &'static str {
        sign.symbol()
    }

    fn caption(sign: ZodiacSign) -> Option<&'static str> {
        Some(sign.date_range())
    }

    fn sign_info(provider: &dyn ContentProvider, sign: ZodiacSign) -> BoxFuture<'_, Result<ZodiacInfo>> {
        provider.zodiac_info(sign)
    }

    fn horoscope(
        provider: &dyn ContentProvider,
        sign: ZodiacSign,
        timeframe: Timeframe,
    ) -> BoxFuture<'_, Result<Horoscope>> {
        provider.horoscope(sign, timeframe)
    }

    fn compatibility(
        provider: &dyn ContentProvider,
        first: ZodiacSign,
        second: ZodiacSign,
    ) -> BoxFuture<'_, Result<CompatibilityInfo>> {
        provider.compatibility(first, second)
    }
}

impl AstrologySystem for Chinese {
    type Sign = ChineseZodiacSign;
    type Info = ChineseZodiacInfo;

    const MODE: AstrologyMode = AstrologyMode::Chinese;
    const SIGN_KEY: &'static str = "selectedChineseSign";
    const TIMEFRAME_KEY: &'static str = "chineseTimeframe";
    const CONTENT_FAILURE: &'static str = "Failed to fetch Chinese zodiac data. Please try again.";
    const HOROSCOPE_FAILURE: &'static str = "Failed to fetch Chinese horoscope. Please try again.";
    const COMPATIBILITY_FAILURE: &'static str =
        "Failed to check Chinese compatibility. Please try again.";

    fn signs() -> &'static [ChineseZodiacSign] {
        &ChineseZodiacSign::ALL
    }

    fn symbol(sign: ChineseZodiacSign) -> &'static str {
        sign.symbol()
    }

    fn caption(_sign: ChineseZodiacSign) -> Option<&'static str> {
        None
    }

    fn sign_info(
        provider: &dyn ContentProvider,
        sign: ChineseZodiacSign,
    ) -> BoxFuture<'_, Result<ChineseZodiacInfo>> {
        provider.chinese_zodiac_info(sign)
    }

    fn horoscope(
        provider: &dyn ContentProvider,
        sign: ChineseZodiacSign,
        timeframe: Timeframe,
    ) -> BoxFuture<'_, Result<Horoscope>> {
        provider.chinese_horoscope(sign, timeframe)
    }

    fn compatibility(
        provider: &dyn ContentProvider,
        first: ChineseZodiacSign,
        second: ChineseZodiacSign,
    ) -> BoxFuture<'_, Result<CompatibilityInfo>> {
        provider.chinese_compatibility(first, second)
    }
}
