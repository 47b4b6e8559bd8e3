//! User registry contract ABI

use alloy_sol_types::sol;

sol! {
    /// Registry user record
    struct User {
        address userAddress;
        string firstName;
        string lastName;
        uint8 role;
        bool isRegistered;
        bool isVerified;
    }

    function getUser(address user) external view returns (User memory);

    /// Public mapping getter; returns the struct members as a tuple
    function ardenUsers(address user) external view returns (
        address userAddress,
        string memory firstName,
        string memory lastName,
        uint8 role,
        bool isRegistered,
        bool isVerified
    );

    function registeredUsers() external view returns (uint256);

    function verifiedUsers() external view returns (uint256);

    function kycVerification(address user) external view returns (string memory);

    function registerUser(string memory firstName, uint8 role, string memory lastName) external;

    function verifyUser(address user, string memory kycHash) external;
}
