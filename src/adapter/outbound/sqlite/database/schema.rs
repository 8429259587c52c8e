// Diesel table definitions, kept in sync with migrations/.

diesel::table! {
    targets (guild_id) {
        guild_id -> BigInt,
        enabled -> Bool,
        channel_id -> Nullable<BigInt>,
        stores -> Text,
        last_check -> BigInt,
        last_deal_id -> Nullable<Text>,
        ping_role_id -> Nullable<BigInt>,
        updated_at -> Text,
    }
}
